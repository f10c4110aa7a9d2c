//! Top navigation bar

use crate::auth::use_is_authenticated;
use crate::client::session;
use crate::navigator::BrowserNavigator;
use crate::routes::AppRoute;
use clinic_core::{InvalidationReason, Location, Navigator};
use tracing::error;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let is_authenticated = use_is_authenticated();

    let on_logout = Callback::from(|_: MouseEvent| {
        if let Err(e) = session().invalidate(InvalidationReason::SignedOut) {
            error!("Failed to sign out: {e}");
        }
        BrowserNavigator.navigate(&Location::login());
    });

    html! {
        <nav class="bg-teal-700 text-white">
            <div class="max-w-4xl mx-auto px-4 py-3 flex items-center justify-between">
                <span class="text-lg font-semibold">{"Clinic"}</span>
                <div class="flex items-center gap-4 text-sm">
                    if is_authenticated {
                        <Link<AppRoute> to={AppRoute::Appointments} classes="hover:underline">
                            {"Appointments"}
                        </Link<AppRoute>>
                        <Link<AppRoute> to={AppRoute::Profile} classes="hover:underline">
                            {"Profile"}
                        </Link<AppRoute>>
                        <button onclick={on_logout} class="px-3 py-1 rounded bg-teal-900 hover:bg-teal-800">
                            {"Sign out"}
                        </button>
                    } else {
                        <Link<AppRoute> to={AppRoute::Login} classes="hover:underline">
                            {"Sign in"}
                        </Link<AppRoute>>
                        <Link<AppRoute> to={AppRoute::Register} classes="hover:underline">
                            {"Register"}
                        </Link<AppRoute>>
                    }
                </div>
            </div>
        </nav>
    }
}
