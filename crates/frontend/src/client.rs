//! Session and API client shared by every page

use crate::config::FrontendConfig;
use crate::navigator::BrowserNavigator;
use crate::storage::LocalSessionStore;
use clinic_core::Session;
pub use clinic_http::ClientError;
use clinic_http::ClinicClient;
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    static SESSION: Session = Session::new(LocalSessionStore::new(FrontendConfig::SESSION_KEY));
    static CLIENT: RefCell<Option<ClinicClient>> = const { RefCell::new(None) };
}

/// The browser session, backed by localStorage
pub fn session() -> Session {
    SESSION.with(Clone::clone)
}

/// Get the API client, building it on first use
pub fn api_client() -> Result<ClinicClient, ClientError> {
    CLIENT.with(|slot| {
        if let Some(client) = slot.borrow().as_ref() {
            return Ok(client.clone());
        }

        let client = ClinicClient::builder()
            .config(&FrontendConfig::client_config())
            .session(session())
            .navigator(Arc::new(BrowserNavigator))
            .build()?;
        *slot.borrow_mut() = Some(client.clone());
        Ok(client)
    })
}
