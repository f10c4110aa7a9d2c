mod form;
mod nav_bar;
mod spinner;

pub use form::{Alert, bind_field, bind_input, bind_select, bind_textarea};
pub use nav_bar::NavBar;
pub use spinner::LoadingSpinner as Spinner;
