//! Account registration

use crate::client::api_client;
use crate::components::{Alert, bind_field};
use crate::routes::AppRoute;
use clinic_http::ClientError;
use clinic_http::types::RegisterRequest;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Default, PartialEq)]
struct RegisterForm {
    username: String,
    email: String,
    password: String,
    confirm: String,
}

impl RegisterForm {
    fn to_request(&self) -> Result<RegisterRequest, String> {
        if self.password != self.confirm {
            return Err("Passwords do not match".to_string());
        }
        let request = RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        request.validate()?;
        Ok(request)
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let navigator = use_navigator();
    let form = use_state(RegisterForm::default);
    let submitting = use_state(|| false);
    let failure = use_state(|| Option::<String>::None);
    let registered = use_state(|| false);

    let on_submit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let failure = failure.clone();
        let registered = registered.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.to_request() {
                Ok(request) => request,
                Err(message) => {
                    failure.set(Some(message));
                    return;
                }
            };

            let submitting = submitting.clone();
            let failure = failure.clone();
            let registered = registered.clone();
            submitting.set(true);
            failure.set(None);

            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.register(request).await.map(|_| ()),
                    Err(e) => Err(e),
                };
                submitting.set(false);
                match result {
                    Ok(()) => registered.set(true),
                    Err(ClientError::Validation(message)) => failure.set(Some(message)),
                    Err(e) => {
                        warn!("Registration failed: {e}");
                        failure.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    if *registered {
        let to_login = Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&AppRoute::Login);
            }
        });
        return html! {
            <div class="max-w-md mx-auto mt-12 bg-white rounded-lg shadow p-8 text-center">
                <Alert message="Account created. You can sign in now." success=true />
                <button onclick={to_login} class="px-4 py-2 rounded bg-teal-600 text-white hover:bg-teal-700">
                    {"Go to sign in"}
                </button>
            </div>
        };
    }

    html! {
        <div class="max-w-md mx-auto mt-12 bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-semibold text-gray-800 mb-6">{"Create an account"}</h1>

            if let Some(message) = &*failure {
                <Alert message={message.clone()} />
            }

            <form onsubmit={on_submit} class="space-y-4">
                <input
                    type="text"
                    placeholder="Username (letters and digits)"
                    value={form.username.clone()}
                    oninput={bind_field(&form, |f, v| f.username = v)}
                    class="w-full px-3 py-2 border rounded"
                />
                <input
                    type="email"
                    placeholder="Email"
                    value={form.email.clone()}
                    oninput={bind_field(&form, |f, v| f.email = v)}
                    class="w-full px-3 py-2 border rounded"
                />
                <input
                    type="password"
                    placeholder="Password"
                    value={form.password.clone()}
                    oninput={bind_field(&form, |f, v| f.password = v)}
                    class="w-full px-3 py-2 border rounded"
                />
                <input
                    type="password"
                    placeholder="Confirm password"
                    value={form.confirm.clone()}
                    oninput={bind_field(&form, |f, v| f.confirm = v)}
                    class="w-full px-3 py-2 border rounded"
                />
                <button
                    type="submit"
                    disabled={*submitting}
                    class="w-full py-2 rounded bg-teal-600 text-white hover:bg-teal-700 disabled:opacity-50"
                >
                    {"Register"}
                </button>
            </form>

            <p class="mt-6 text-sm text-gray-600 text-center">
                {"Already registered? "}
                <Link<AppRoute> to={AppRoute::Login} classes="text-teal-600 hover:underline">
                    {"Sign in"}
                </Link<AppRoute>>
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            email: " bob@example.com ".into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn test_register_form_checks_confirmation_first() {
        let err = form("bob", "secret1", "secret2").to_request().unwrap_err();
        assert_eq!(err, "Passwords do not match");
    }

    #[test]
    fn test_register_form_trims_and_validates() {
        let request = form("bob42", "secret1", "secret1").to_request().unwrap();
        assert_eq!(request.email, "bob@example.com");

        assert!(form("b!", "secret1", "secret1").to_request().is_err());
    }
}
