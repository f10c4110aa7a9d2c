//! Profile view, edit and account deletion

use crate::client::api_client;
use crate::components::{Alert, Spinner, bind_field, bind_textarea};
use crate::routes::AppRoute;
use chrono::NaiveDate;
use clinic_http::types::{ProfileUpdate, UserProfile};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

/// Editable copy of the profile; every field is plain text
#[derive(Clone, Debug, Default, PartialEq)]
struct ProfileForm {
    first_name: String,
    last_name: String,
    date_of_birth: String,
    phone_number: String,
    address: String,
    allergies: String,
    chronic_conditions: String,
    current_medications: String,
}

impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            first_name: text(&profile.first_name),
            last_name: text(&profile.last_name),
            date_of_birth: profile
                .date_of_birth
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            phone_number: text(&profile.phone_number),
            address: text(&profile.address),
            allergies: text(&profile.allergies),
            chronic_conditions: text(&profile.chronic_conditions),
            current_medications: text(&profile.current_medications),
        }
    }
}

impl ProfileForm {
    /// Only non-blank fields are sent; blank ones stay unchanged on the server
    fn to_update(&self) -> Result<ProfileUpdate, String> {
        let text = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let date_of_birth = match text(&self.date_of_birth) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| "Date of birth must be YYYY-MM-DD".to_string())?,
            ),
            None => None,
        };
        let update = ProfileUpdate {
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            date_of_birth,
            phone_number: text(&self.phone_number),
            address: text(&self.address),
            allergies: text(&self.allergies),
            chronic_conditions: text(&self.chronic_conditions),
            current_medications: text(&self.current_medications),
            ..ProfileUpdate::default()
        };
        update.validate()?;
        Ok(update)
    }
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let navigator = use_navigator();
    let profile = use_state(|| Option::<UserProfile>::None);
    let form = use_state(ProfileForm::default);
    let failure = use_state(|| Option::<String>::None);
    let saved = use_state(|| false);

    // Load the profile on mount
    {
        let profile = profile.clone();
        let form = form.clone();
        let failure = failure.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.me().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(me) => {
                        form.set(ProfileForm::from(&me));
                        profile.set(Some(me));
                    }
                    // A 401 has already sent us to the login page
                    Err(e) if e.is_unauthorized() => {}
                    Err(e) => {
                        warn!("Failed to load profile: {e}");
                        failure.set(Some(e.to_string()));
                    }
                }
            });
        });
    }

    let on_save = {
        let profile = profile.clone();
        let form = form.clone();
        let failure = failure.clone();
        let saved = saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let update = match form.to_update() {
                Ok(update) => update,
                Err(message) => {
                    failure.set(Some(message));
                    return;
                }
            };
            let profile = profile.clone();
            let form = form.clone();
            let failure = failure.clone();
            let saved = saved.clone();
            failure.set(None);
            saved.set(false);

            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.update_profile(update).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(updated) => {
                        form.set(ProfileForm::from(&updated));
                        profile.set(Some(updated));
                        saved.set(true);
                    }
                    Err(e) if e.is_unauthorized() => {}
                    Err(e) => failure.set(Some(e.to_string())),
                }
            });
        })
    };

    let on_delete = {
        let failure = failure.clone();
        Callback::from(move |_: MouseEvent| {
            if !gloo::dialogs::confirm("Delete your account and all appointments?") {
                return;
            }
            let failure = failure.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.delete_account().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(_) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::Login);
                        }
                    }
                    Err(e) if e.is_unauthorized() => {}
                    Err(e) => failure.set(Some(e.to_string())),
                }
            });
        })
    };

    let Some(me) = (*profile).clone() else {
        return html! {
            <div class="max-w-2xl mx-auto mt-8">
                if let Some(message) = &*failure {
                    <Alert message={message.clone()} />
                } else {
                    <Spinner text={Some("Loading profile...".to_string())} />
                }
            </div>
        };
    };

    let input_class = "w-full px-3 py-2 border rounded";

    html! {
        <div class="max-w-2xl mx-auto mt-8 bg-white rounded-lg shadow p-8">
            <h1 class="text-2xl font-semibold text-gray-800">{me.display_name()}</h1>
            <p class="text-sm text-gray-500 mb-6">{format!("{} · {}", me.username, me.email)}</p>

            if let Some(message) = &*failure {
                <Alert message={message.clone()} />
            }
            if *saved {
                <Alert message="Profile saved." success=true />
            }

            <form onsubmit={on_save} class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <label class="text-sm text-gray-700">{"First name"}
                    <input class={input_class} value={form.first_name.clone()}
                        oninput={bind_field(&form, |f, v| f.first_name = v)} />
                </label>
                <label class="text-sm text-gray-700">{"Last name"}
                    <input class={input_class} value={form.last_name.clone()}
                        oninput={bind_field(&form, |f, v| f.last_name = v)} />
                </label>
                <label class="text-sm text-gray-700">{"Date of birth"}
                    <input type="date" class={input_class} value={form.date_of_birth.clone()}
                        oninput={bind_field(&form, |f, v| f.date_of_birth = v)} />
                </label>
                <label class="text-sm text-gray-700">{"Phone number"}
                    <input type="tel" class={input_class} value={form.phone_number.clone()}
                        oninput={bind_field(&form, |f, v| f.phone_number = v)} />
                </label>
                <label class="text-sm text-gray-700 md:col-span-2">{"Address"}
                    <textarea class={input_class} value={form.address.clone()}
                        oninput={bind_textarea(&form, |f, v| f.address = v)} />
                </label>
                <label class="text-sm text-gray-700 md:col-span-2">{"Allergies"}
                    <textarea class={input_class} value={form.allergies.clone()}
                        oninput={bind_textarea(&form, |f, v| f.allergies = v)} />
                </label>
                <label class="text-sm text-gray-700 md:col-span-2">{"Chronic conditions"}
                    <textarea class={input_class} value={form.chronic_conditions.clone()}
                        oninput={bind_textarea(&form, |f, v| f.chronic_conditions = v)} />
                </label>
                <label class="text-sm text-gray-700 md:col-span-2">{"Current medications"}
                    <textarea class={input_class} value={form.current_medications.clone()}
                        oninput={bind_textarea(&form, |f, v| f.current_medications = v)} />
                </label>
                <div class="md:col-span-2 flex justify-between">
                    <button type="submit" class="px-4 py-2 rounded bg-teal-600 text-white hover:bg-teal-700">
                        {"Save"}
                    </button>
                    <button type="button" onclick={on_delete}
                        class="px-4 py-2 rounded border border-red-400 text-red-700 hover:bg-red-50">
                        {"Delete account"}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 7,
            username: "somsri".into(),
            email: "somsri@example.com".into(),
            first_name: Some("Somsri".into()),
            last_name: None,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 1),
            address: None,
            phone_number: Some("0812345678".into()),
            allergies: None,
            chronic_conditions: None,
            current_medications: None,
        }
    }

    #[test]
    fn test_form_round_trips_set_fields_only() {
        let form = ProfileForm::from(&profile());
        assert_eq!(form.date_of_birth, "1990-05-01");

        let update = form.to_update().unwrap();
        assert_eq!(update.first_name.as_deref(), Some("Somsri"));
        assert_eq!(update.last_name, None);
        assert_eq!(update.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 1));
        assert_eq!(update.username, None);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let form = ProfileForm {
            date_of_birth: "01/05/1990".into(),
            ..ProfileForm::default()
        };
        assert!(form.to_update().is_err());
    }
}
