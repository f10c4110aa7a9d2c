//! Landing route for the external identity provider redirect
//!
//! The backend sends the browser to `/login/callback?token=<jwt>` on success
//! or `/login/callback?error=<code>` on failure. The parameters are read once
//! and only the token outlives the decision.

use crate::navigation::Navigator;
use crate::route::{Location, Route};
use crate::session::{Session, SessionOrigin, SessionToken};
use tracing::{error, info, warn};

/// Error code forwarded to the login page when the token cannot be stored
pub const STORAGE_FAILED_CODE: &str = "session_storage_failed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Extract the parameters, treating blank values as absent
    pub fn from_location(location: &Location) -> Self {
        let non_empty = |key: &str| {
            location
                .query_value(key)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_owned)
        };
        Self {
            token: non_empty("token"),
            error: non_empty("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Token stored, user sent to the default authenticated page
    Authenticated,
    /// Provider reported an error code, user sent back to login
    Failed(String),
    /// Nothing usable in the redirect
    Missing,
}

pub struct LoginCallback;

impl LoginCallback {
    /// Consume the redirect parameters and navigate accordingly
    pub fn complete(
        params: CallbackParams,
        session: &Session,
        navigator: &dyn Navigator,
    ) -> CallbackOutcome {
        if let Some(raw) = params.token {
            let stored = SessionToken::new(raw)
                .and_then(|token| session.establish(token, SessionOrigin::IdentityProvider));
            return match stored {
                Ok(()) => {
                    info!("Identity provider login completed");
                    navigator.navigate(&Location::new(Route::DEFAULT_AUTHENTICATED));
                    CallbackOutcome::Authenticated
                }
                Err(e) => {
                    error!("Failed to store identity provider token: {e}");
                    Self::fail(STORAGE_FAILED_CODE.to_owned(), navigator)
                }
            };
        }

        if let Some(code) = params.error {
            warn!(%code, "Identity provider login failed");
            return Self::fail(code, navigator);
        }

        warn!("Login callback reached without token or error");
        navigator.navigate(&Location::login());
        CallbackOutcome::Missing
    }

    fn fail(code: String, navigator: &dyn Navigator) -> CallbackOutcome {
        navigator.navigate(&Location::login().with_query("error", code.clone()));
        CallbackOutcome::Failed(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::NavigationGuard;
    use crate::navigation::MemoryNavigator;

    fn setup() -> (Session, MemoryNavigator) {
        let session = Session::in_memory();
        let navigator = MemoryNavigator::new(NavigationGuard::new(session.clone()));
        (session, navigator)
    }

    #[test]
    fn test_params_ignore_empty_values() {
        let location = Location::parse("/login/callback?token=&error=denied").unwrap();
        let params = CallbackParams::from_location(&location);
        assert_eq!(params.token, None);
        assert_eq!(params.error.as_deref(), Some("denied"));
    }

    #[test]
    fn test_token_wins_over_error() {
        let (session, navigator) = setup();
        let params = CallbackParams {
            token: Some("abc".into()),
            error: Some("ignored".into()),
        };

        let outcome = LoginCallback::complete(params, &session, &navigator);
        assert_eq!(outcome, CallbackOutcome::Authenticated);
        assert_eq!(session.token().unwrap().as_str(), "abc");
        assert_eq!(navigator.current().unwrap().route, Route::Appointments);
    }

    #[test]
    fn test_missing_params_go_to_plain_login() {
        let (session, navigator) = setup();
        let outcome = LoginCallback::complete(CallbackParams::default(), &session, &navigator);
        assert_eq!(outcome, CallbackOutcome::Missing);
        assert_eq!(navigator.current().unwrap(), Location::login());
        assert!(!session.is_active());
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let (session, navigator) = setup();
        let location = Location::parse("/login/callback?token=%20%20").unwrap();
        let params = CallbackParams::from_location(&location);
        assert_eq!(params, CallbackParams::default());

        let outcome = LoginCallback::complete(params, &session, &navigator);
        assert_eq!(outcome, CallbackOutcome::Missing);
        assert_eq!(navigator.current().unwrap(), Location::login());
        assert!(!session.is_active());
    }
}
