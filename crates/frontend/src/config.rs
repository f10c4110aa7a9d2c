//! Frontend configuration

use clinic_core::ClientConfig;
use clinic_core::config::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SESSION_KEY};

/// Build-time settings for the browser app
pub struct FrontendConfig;

impl FrontendConfig {
    /// API origin, overridable with `CLINIC_API_URL` at build time
    pub const API_BASE_URL: &'static str = match option_env!("CLINIC_API_URL") {
        Some(url) => url,
        None => DEFAULT_API_BASE_URL,
    };

    /// localStorage key holding the bearer token
    pub const SESSION_KEY: &'static str = DEFAULT_SESSION_KEY;

    pub const REQUEST_TIMEOUT_SECS: u64 = DEFAULT_REQUEST_TIMEOUT_SECS;

    /// Shown on the login page after the server rejected the stored token
    pub const SESSION_EXPIRED_NOTICE: &'static str =
        "Your session has expired. Please sign in again.";

    pub fn client_config() -> ClientConfig {
        ClientConfig {
            api_base_url: Self::API_BASE_URL.to_string(),
            request_timeout_secs: Self::REQUEST_TIMEOUT_SECS,
            session_key: Self::SESSION_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_uses_ten_second_timeout() {
        let config = FrontendConfig::client_config();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.session_key, "token");
        assert!(!config.api_base_url.is_empty());
    }
}
