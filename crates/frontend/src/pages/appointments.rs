//! Booking form and the list of booked appointments

use crate::client::api_client;
use crate::components::{Alert, Spinner, bind_field, bind_select, bind_textarea};
use chrono::NaiveDate;
use clinic_http::ClientError;
use clinic_http::types::{Appointment, AppointmentCreate, TimeSlot};
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct BookingForm {
    date: String,
    time_slot: String,
    doctor_name: String,
    reason: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            time_slot: "morning".to_string(),
            doctor_name: String::new(),
            reason: String::new(),
        }
    }
}

impl BookingForm {
    fn to_create(&self) -> Result<AppointmentCreate, String> {
        let appointment_date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "Choose an appointment date".to_string())?;
        let time_slot = self.time_slot.parse::<TimeSlot>()?;
        let optional = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Ok(AppointmentCreate {
            appointment_date,
            time_slot,
            reason: optional(&self.reason),
            doctor_name: optional(&self.doctor_name),
        })
    }
}

fn slot_value(slot: TimeSlot) -> &'static str {
    match slot {
        TimeSlot::Morning => "morning",
        TimeSlot::Afternoon => "afternoon",
    }
}

/// Report a failed call unless the 401 interceptor already took over
fn report(failure: &UseStateHandle<Option<String>>, context: &str, error: &ClientError) {
    if error.is_unauthorized() {
        return;
    }
    warn!("{context}: {error}");
    failure.set(Some(error.to_string()));
}

#[function_component(AppointmentsPage)]
pub fn appointments_page() -> Html {
    let appointments = use_state(|| Option::<Vec<Appointment>>::None);
    let doctors = use_state(Vec::<String>::new);
    let form = use_state(BookingForm::default);
    let failure = use_state(|| Option::<String>::None);
    let booked = use_state(|| false);
    // Bumped after every change to reload the list
    let revision = use_state(|| 0_u32);

    {
        let doctors = doctors.clone();
        let failure = failure.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.list_doctors().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(names) => doctors.set(names),
                    Err(e) => report(&failure, "Failed to load doctors", &e),
                }
            });
        });
    }

    {
        let appointments = appointments.clone();
        let failure = failure.clone();
        use_effect_with(*revision, move |_| {
            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.list_appointments().await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(mut list) => {
                        list.sort_by_key(|a| (a.appointment_date, a.appointment_time));
                        appointments.set(Some(list));
                    }
                    Err(e) => report(&failure, "Failed to load appointments", &e),
                }
            });
        });
    }

    let on_book = {
        let form = form.clone();
        let failure = failure.clone();
        let booked = booked.clone();
        let revision = revision.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.to_create() {
                Ok(request) => request,
                Err(message) => {
                    failure.set(Some(message));
                    return;
                }
            };
            let form = form.clone();
            let failure = failure.clone();
            let booked = booked.clone();
            let revision = revision.clone();
            failure.set(None);
            booked.set(false);

            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.create_appointment(request).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(_) => {
                        form.set(BookingForm::default());
                        booked.set(true);
                        revision.set(*revision + 1);
                    }
                    Err(e) => report(&failure, "Booking failed", &e),
                }
            });
        })
    };

    let on_cancel = {
        let failure = failure.clone();
        let revision = revision.clone();
        Callback::from(move |id: i64| {
            if !gloo::dialogs::confirm("Cancel this appointment?") {
                return;
            }
            let failure = failure.clone();
            let revision = revision.clone();
            spawn_local(async move {
                let result = match api_client() {
                    Ok(client) => client.delete_appointment(id).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(_) => revision.set(*revision + 1),
                    Err(e) => report(&failure, "Cancelling failed", &e),
                }
            });
        })
    };

    let list = match &*appointments {
        None => html! { <Spinner text={Some("Loading appointments...".to_string())} /> },
        Some(list) if list.is_empty() => html! {
            <p class="text-gray-500 text-sm">{"No appointments booked yet."}</p>
        },
        Some(list) => html! {
            <table class="w-full text-sm">
                <thead>
                    <tr class="text-left text-gray-500 border-b">
                        <th class="py-2">{"Date"}</th>
                        <th>{"Time"}</th>
                        <th>{"Doctor"}</th>
                        <th>{"Reason"}</th>
                        <th>{"Status"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for list.iter().map(|appointment| {
                        let id = appointment.id;
                        let on_cancel = on_cancel.reform(move |_: MouseEvent| id);
                        html! {
                            <tr key={id} class="border-b">
                                <td class="py-2">{appointment.appointment_date.format("%Y-%m-%d").to_string()}</td>
                                <td>{appointment.appointment_time.format("%H:%M").to_string()}</td>
                                <td>{appointment.doctor_name.clone()}</td>
                                <td>{appointment.reason.clone().unwrap_or_default()}</td>
                                <td>{appointment.status.clone()}</td>
                                <td class="text-right">
                                    <button onclick={on_cancel} class="text-red-600 hover:underline">{"Cancel"}</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        },
    };

    let input_class = "w-full px-3 py-2 border rounded";

    html! {
        <div class="max-w-4xl mx-auto mt-8 space-y-8">
            <section class="bg-white rounded-lg shadow p-6">
                <h2 class="text-xl font-semibold text-gray-800 mb-4">{"Book an appointment"}</h2>

                if let Some(message) = &*failure {
                    <Alert message={message.clone()} />
                }
                if *booked {
                    <Alert message="Appointment booked." success=true />
                }

                <form onsubmit={on_book} class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <input type="date" class={input_class} value={form.date.clone()}
                        oninput={bind_field(&form, |f, v| f.date = v)} />
                    <select class={input_class} onchange={bind_select(&form, |f, v| f.time_slot = v)}>
                        { for TimeSlot::ALL.iter().map(|slot| html! {
                            <option value={slot_value(*slot)} selected={form.time_slot == slot_value(*slot)}>
                                {slot.label()}
                            </option>
                        }) }
                    </select>
                    <select class={input_class} onchange={bind_select(&form, |f, v| f.doctor_name = v)}>
                        <option value="" selected={form.doctor_name.is_empty()}>{"Any doctor"}</option>
                        { for doctors.iter().map(|name| html! {
                            <option value={name.clone()} selected={form.doctor_name == *name}>{name.clone()}</option>
                        }) }
                    </select>
                    <textarea class={classes!(input_class, "md:col-span-3")} placeholder="Reason for the visit"
                        value={form.reason.clone()}
                        oninput={bind_textarea(&form, |f, v| f.reason = v)} />
                    <div class="md:col-span-3">
                        <button type="submit" class="px-4 py-2 rounded bg-teal-600 text-white hover:bg-teal-700">
                            {"Book"}
                        </button>
                    </div>
                </form>
            </section>

            <section class="bg-white rounded-lg shadow p-6">
                <h2 class="text-xl font-semibold text-gray-800 mb-4">{"Your appointments"}</h2>
                {list}
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_form_builds_request() {
        let form = BookingForm {
            date: "2025-03-14".into(),
            time_slot: "afternoon".into(),
            doctor_name: String::new(),
            reason: "  follow-up ".into(),
        };
        let request = form.to_create().unwrap();
        assert_eq!(request.appointment_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(request.time_slot, TimeSlot::Afternoon);
        assert_eq!(request.doctor_name, None);
        assert_eq!(request.reason.as_deref(), Some("follow-up"));
    }

    #[test]
    fn test_booking_form_requires_date() {
        assert!(BookingForm::default().to_create().is_err());
    }

    #[test]
    fn test_slot_values_parse_back() {
        for slot in TimeSlot::ALL {
            assert_eq!(slot_value(slot).parse::<TimeSlot>().unwrap(), slot);
        }
    }
}
