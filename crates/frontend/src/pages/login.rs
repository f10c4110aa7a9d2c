//! Email/password and Google sign-in

use crate::auth::{AuthAction, login_error_message, use_auth};
use crate::client::api_client;
use crate::components::{Alert, bind_input};
use crate::routes::AppRoute;
use clinic_core::Location;
use clinic_http::types::LoginRequest;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    /// Location the page was entered with; carries `?error=` after a failed redirect
    pub location: Location,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let submitting = use_state(|| false);
    let failure = use_state(|| Option::<String>::None);

    let google_url = use_memo((), |_| api_client().map(|client| client.google_login_url()).ok());

    let on_submit = {
        let auth = auth.clone();
        let email = email.clone();
        let password = password.clone();
        let submitting = submitting.clone();
        let failure = failure.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }

            let request = LoginRequest {
                email: (*email).trim().to_string(),
                password: (*password).clone(),
            };
            let submitting = submitting.clone();
            let failure = failure.clone();
            let navigator = navigator.clone();
            auth.dispatch(AuthAction::DismissNotice);
            submitting.set(true);
            failure.set(None);

            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.login(request).await.map(|_| ()),
                    Err(e) => Err(e),
                };
                submitting.set(false);
                match result {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::Appointments);
                        }
                    }
                    Err(e) => {
                        warn!("Login failed: {e}");
                        failure.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let redirect_error = props.location.query_value("error").map(login_error_message);

    html! {
        <div class="max-w-md mx-auto mt-12 bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-semibold text-gray-800 mb-6">{"Sign in"}</h1>

            if let Some(notice) = &auth.notice {
                <Alert message={notice.clone()} />
            }
            if let Some(message) = redirect_error {
                <Alert message={message} />
            }
            if let Some(message) = &*failure {
                <Alert message={message.clone()} />
            }

            <form onsubmit={on_submit} class="space-y-4">
                <input
                    type="email"
                    placeholder="Email"
                    required=true
                    value={(*email).clone()}
                    oninput={bind_input(&email)}
                    class="w-full px-3 py-2 border rounded"
                />
                <input
                    type="password"
                    placeholder="Password"
                    required=true
                    value={(*password).clone()}
                    oninput={bind_input(&password)}
                    class="w-full px-3 py-2 border rounded"
                />
                <button
                    type="submit"
                    disabled={*submitting}
                    class="w-full py-2 rounded bg-teal-600 text-white hover:bg-teal-700 disabled:opacity-50"
                >
                    { if *submitting { "Signing in..." } else { "Sign in" } }
                </button>
            </form>

            if let Some(url) = (*google_url).clone() {
                <a href={url} class="mt-4 block w-full text-center py-2 rounded border hover:bg-gray-50">
                    {"Sign in with Google"}
                </a>
            }

            <p class="mt-6 text-sm text-gray-600 text-center">
                {"No account yet? "}
                <Link<AppRoute> to={AppRoute::Register} classes="text-teal-600 hover:underline">
                    {"Register"}
                </Link<AppRoute>>
            </p>
        </div>
    }
}
