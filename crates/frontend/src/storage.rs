//! Browser persistence for the session token

use clinic_core::{CoreError, CoreResult, SessionStore, SessionToken};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Stores the bearer token under a single localStorage key
#[derive(Debug, Clone)]
pub struct LocalSessionStore {
    key: String,
}

impl LocalSessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl SessionStore for LocalSessionStore {
    fn load(&self) -> CoreResult<Option<SessionToken>> {
        let raw = local_storage()?.get_item(&self.key).map_err(js_error)?;
        // A blank value left behind by other code counts as signed out
        Ok(raw.and_then(|raw| SessionToken::new(raw).ok()))
    }

    fn save(&self, token: &SessionToken) -> CoreResult<()> {
        local_storage()?
            .set_item(&self.key, token.as_str())
            .map_err(js_error)
    }

    fn clear(&self) -> CoreResult<()> {
        local_storage()?.remove_item(&self.key).map_err(js_error)
    }
}

fn local_storage() -> CoreResult<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| CoreError::storage("localStorage is not available"))
}

fn js_error(value: JsValue) -> CoreError {
    CoreError::storage(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
