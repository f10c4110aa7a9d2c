use clinic_frontend::App;

fn main() {
    clinic_frontend::logging::init();
    yew::Renderer::<App>::new().render();
}
