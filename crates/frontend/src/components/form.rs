//! Small form helpers shared by the pages

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Callback writing an input's value into a string state
pub fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

/// Callback applying an input's value to one field of a form state
pub fn bind_field<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

pub fn bind_textarea<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, input.value());
        form.set(next);
    })
}

pub fn bind_select<F: Clone + 'static>(
    form: &UseStateHandle<F>,
    apply: fn(&mut F, String),
) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        apply(&mut next, select.value());
        form.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub success: bool,
}

/// Inline error or confirmation banner
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let class = if props.success {
        "mb-4 p-3 rounded border border-green-300 bg-green-50 text-green-800 text-sm"
    } else {
        "mb-4 p-3 rounded border border-red-300 bg-red-50 text-red-800 text-sm"
    };
    html! { <div class={class} role="alert">{props.message.clone()}</div> }
}
