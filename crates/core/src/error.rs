//! Common error handling utilities and conventions

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core error types shared by the client crates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Session token must not be empty")]
    InvalidToken,

    #[error("Session storage failed: {message}")]
    Storage { message: String },

    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },

    #[error("Redirect loop while resolving {path}")]
    RedirectLoop { path: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid location error
    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::InvalidLocation {
            message: message.into(),
        }
    }

    /// Create a redirect loop error
    pub fn redirect_loop(path: impl Into<String>) -> Self {
        Self::RedirectLoop { path: path.into() }
    }

    /// Create an invalid config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err.to_string())
    }
}

#[cfg(feature = "loader")]
impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(err.to_string())
    }
}
