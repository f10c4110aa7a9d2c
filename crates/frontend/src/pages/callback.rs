//! Landing page for the Google sign-in redirect

use crate::client::session;
use crate::components::Spinner;
use crate::navigator::BrowserNavigator;
use clinic_core::{CallbackParams, Location, LoginCallback};
use tracing::debug;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginCallbackProps {
    pub location: Location,
}

/// Reads `token` or `error` once on mount, then navigates away
#[function_component(LoginCallbackPage)]
pub fn login_callback_page(props: &LoginCallbackProps) -> Html {
    {
        let location = props.location.clone();
        use_effect_with((), move |_| {
            let params = CallbackParams::from_location(&location);
            let outcome = LoginCallback::complete(params, &session(), &BrowserNavigator);
            debug!(?outcome, "Login callback handled");
        });
    }

    html! { <Spinner text={Some("Signing you in...".to_string())} /> }
}
