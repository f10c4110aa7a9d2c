//! Navigation guard run before every route change

use crate::error::{CoreError, CoreResult};
use crate::route::{Location, RouteAccess};
use crate::session::Session;
use tracing::{debug, warn};

/// Upper bound on chained static redirects for a single navigation
pub const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested location is rendered as-is
    Allowed,
    /// A static route redirect replaced the requested location
    Redirected,
    /// The destination needed a session and none was stored
    RedirectedToLogin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationDecision {
    /// Location that becomes active
    pub location: Location,
    pub outcome: NavigationOutcome,
}

impl NavigationDecision {
    pub fn is_allowed(&self) -> bool {
        self.outcome == NavigationOutcome::Allowed
    }
}

#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: Session,
}

impl NavigationGuard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Decide where a navigation to `target` ends up
    pub fn check(&self, target: &Location) -> CoreResult<NavigationDecision> {
        let mut location = target.clone();
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            if let Some(next) = location.route.redirect() {
                debug!(from = %location, to = next.path(), "Static route redirect");
                location = Location::new(next);
                redirected = true;
                continue;
            }

            if location.route.access() == RouteAccess::RequiresSession && !self.session.is_active()
            {
                warn!(target = %location, "No session, redirecting to login");
                return Ok(NavigationDecision {
                    location: Location::login(),
                    outcome: NavigationOutcome::RedirectedToLogin,
                });
            }

            let outcome = if redirected {
                NavigationOutcome::Redirected
            } else {
                NavigationOutcome::Allowed
            };
            return Ok(NavigationDecision { location, outcome });
        }

        Err(CoreError::redirect_loop(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::session::{MemorySessionStore, SessionToken};

    fn signed_in() -> Session {
        Session::new(MemorySessionStore::with_token(
            SessionToken::new("abc").unwrap(),
        ))
    }

    #[test]
    fn test_protected_routes_require_session() {
        let guard = NavigationGuard::new(Session::in_memory());
        for route in [Route::Profile, Route::Appointments] {
            let decision = guard.check(&Location::new(route)).unwrap();
            assert_eq!(decision.outcome, NavigationOutcome::RedirectedToLogin);
            assert_eq!(decision.location, Location::login());
        }
    }

    #[test]
    fn test_protected_routes_allowed_with_session() {
        let guard = NavigationGuard::new(signed_in());
        let decision = guard.check(&Location::new(Route::Profile)).unwrap();
        assert!(decision.is_allowed());
        assert_eq!(decision.location.route, Route::Profile);
    }

    #[test]
    fn test_public_routes_always_allowed() {
        let guard = NavigationGuard::new(Session::in_memory());
        for route in [Route::Login, Route::Register, Route::LoginCallback, Route::NotFound] {
            assert!(guard.check(&Location::new(route)).unwrap().is_allowed());
        }
    }

    #[test]
    fn test_root_redirects_to_login() {
        for session in [Session::in_memory(), signed_in()] {
            let guard = NavigationGuard::new(session);
            let decision = guard.check(&Location::new(Route::Root)).unwrap();
            assert_eq!(decision.outcome, NavigationOutcome::Redirected);
            assert_eq!(decision.location.route, Route::Login);
        }
    }

    #[test]
    fn test_guard_drops_query_of_blocked_target() {
        let guard = NavigationGuard::new(Session::in_memory());
        let target = Location::new(Route::Appointments).with_query("page", "2");
        let decision = guard.check(&target).unwrap();
        assert!(decision.location.query.is_empty());
    }

    #[test]
    fn test_guard_follows_session_changes() {
        let session = Session::in_memory();
        let guard = NavigationGuard::new(session.clone());
        let target = Location::new(Route::Appointments);

        assert!(!guard.check(&target).unwrap().is_allowed());
        session
            .establish(
                SessionToken::new("t").unwrap(),
                crate::session::SessionOrigin::PasswordLogin,
            )
            .unwrap();
        assert!(guard.check(&target).unwrap().is_allowed());
    }
}
