//! Authentication module

pub mod context;
pub mod error_messages;
pub mod session_events;

// Re-export commonly used items
pub use context::{
    AuthAction, AuthContext, AuthContextData, AuthProvider, use_auth, use_is_authenticated,
};
pub use error_messages::login_error_message;
