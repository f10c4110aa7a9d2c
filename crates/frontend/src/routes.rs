//! Router table and the guarded page switch

use crate::client::session;
use crate::components::Spinner;
use crate::navigator::BrowserNavigator;
use crate::pages::{AppointmentsPage, LoginCallbackPage, LoginPage, ProfilePage, RegisterPage};
use clinic_core::{Location, NavigationGuard, Route};
use tracing::{debug, error};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Copy, Routable, PartialEq, Eq, Debug)]
pub enum AppRoute {
    #[at("/")]
    Root,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/profile")]
    Profile,
    #[at("/appointments")]
    Appointments,
    #[at("/login/callback")]
    LoginCallback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<AppRoute> for Route {
    fn from(route: AppRoute) -> Self {
        match route {
            AppRoute::Root => Route::Root,
            AppRoute::Login => Route::Login,
            AppRoute::Register => Route::Register,
            AppRoute::Profile => Route::Profile,
            AppRoute::Appointments => Route::Appointments,
            AppRoute::LoginCallback => Route::LoginCallback,
            AppRoute::NotFound => Route::NotFound,
        }
    }
}

impl From<Route> for AppRoute {
    fn from(route: Route) -> Self {
        match route {
            Route::Root => AppRoute::Root,
            Route::Login => AppRoute::Login,
            Route::Register => AppRoute::Register,
            Route::Profile => AppRoute::Profile,
            Route::Appointments => AppRoute::Appointments,
            Route::LoginCallback => AppRoute::LoginCallback,
            Route::NotFound => AppRoute::NotFound,
        }
    }
}

/// Render function for `Switch<AppRoute>`
pub fn switch(route: AppRoute) -> Html {
    html! { <Guarded {route} /> }
}

#[derive(Properties, PartialEq)]
struct GuardedProps {
    route: AppRoute,
}

/// Runs the navigation guard before any page is rendered
///
/// A blocked destination is replaced in the history, never pushed over.
#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let query = use_location()
        .map(|location| location.query_str().to_string())
        .unwrap_or_default();
    let target = Location::parse(&format!("{}{}", props.route.to_path(), query))
        .unwrap_or_else(|_| Location::new(props.route.into()));

    let decision = NavigationGuard::new(session()).check(&target);
    let redirect = match &decision {
        Ok(decision) if !decision.is_allowed() => Some(decision.location.clone()),
        _ => None,
    };

    use_effect_with(redirect, |redirect| {
        if let Some(location) = redirect {
            BrowserNavigator.replace(location);
        }
    });

    match decision {
        Ok(decision) if decision.is_allowed() => render_page(&decision.location),
        Ok(decision) => {
            debug!(from = %target, to = %decision.location, "Guard redirect");
            html! { <Spinner /> }
        }
        Err(e) => {
            error!("Navigation guard failed: {e}");
            html! { <NotFound /> }
        }
    }
}

fn render_page(location: &Location) -> Html {
    match location.route {
        Route::Login => html! { <LoginPage location={location.clone()} /> },
        Route::Register => html! { <RegisterPage /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Appointments => html! { <AppointmentsPage /> },
        Route::LoginCallback => html! { <LoginCallbackPage location={location.clone()} /> },
        Route::NotFound => html! { <NotFound /> },
        // Root always redirects; the guard never allows it
        Route::Root => html! { <Spinner /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    html! {
        <div class="text-center py-20">
            <h1 class="text-2xl font-semibold text-gray-800 mb-4">{"Page not found"}</h1>
            <Link<AppRoute> to={AppRoute::Appointments} classes="text-teal-600 hover:underline">
                {"Back to appointments"}
            </Link<AppRoute>>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_paths_match_route_table() {
        for route in Route::ALL {
            let app_route = AppRoute::from(route);
            assert_eq!(Route::from(app_route), route);
            if route != Route::NotFound {
                assert_eq!(app_route.to_path(), route.path());
            }
        }
    }

    #[test]
    fn test_recognize_callback_before_login() {
        assert_eq!(
            AppRoute::recognize("/login/callback"),
            Some(AppRoute::LoginCallback)
        );
        assert_eq!(AppRoute::recognize("/login"), Some(AppRoute::Login));
    }
}
