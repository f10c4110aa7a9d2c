//! Browser test for guard redirects against the real history
//!
//! Run with `wasm-pack test --headless --firefox crates/frontend`.
#![cfg(target_arch = "wasm32")]

use clinic_frontend::{App, FrontendConfig};
use std::time::Duration;
use wasm_bindgen_test::*;
use yew_router::history::{BrowserHistory, History};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn blocked_navigation_replaces_history_entry() {
    web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .remove_item(FrontendConfig::SESSION_KEY)
        .unwrap();

    let history = BrowserHistory::new();
    history.replace("/profile");
    let entries = history.len();

    yew::Renderer::<App>::new().render();
    yew::platform::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(history.location().path(), "/login");
    assert_eq!(history.len(), entries);
}
