use crate::auth::AuthProvider;
use crate::components::NavBar;
use crate::routes::{AppRoute, switch};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <div class="min-h-screen bg-gray-50">
                    <NavBar />
                    <main class="px-4 pb-12">
                        <Switch<AppRoute> render={switch} />
                    </main>
                </div>
            </AuthProvider>
        </BrowserRouter>
    }
}
