//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Storage key holding the bearer credential
pub const DEFAULT_SESSION_KEY: &str = "token";

/// Settings shared by every client front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin every request is sent to
    pub api_base_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Key under which the credential is persisted
    pub session_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_key: DEFAULT_SESSION_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(feature = "loader")]
impl ClientConfig {
    /// Load configuration from defaults, an optional file and `CLINIC_*` variables
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a value fails to parse or
    /// the request timeout is zero
    pub fn load(path: Option<&std::path::Path>) -> crate::CoreResult<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("session_key", defaults.session_key)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("CLINIC").try_parsing(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        if config.request_timeout_secs == 0 {
            return Err(crate::CoreError::config(
                "request_timeout_secs must be at least 1",
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.session_key, "token");
    }

    #[cfg(feature = "loader")]
    #[test]
    fn test_load_from_file_overrides_defaults() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "api_base_url = \"https://clinic.example\"").unwrap();
        writeln!(file, "request_timeout_secs = 3").unwrap();

        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.api_base_url, "https://clinic.example");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.session_key, "token");
    }

    #[cfg(feature = "loader")]
    #[test]
    fn test_load_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.toml");
        std::fs::write(&path, "request_timeout_secs = 0\n").unwrap();

        let err = ClientConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, crate::CoreError::Config { .. }));
    }
}
