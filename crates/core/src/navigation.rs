//! Navigation targets used for forced redirects

use crate::guard::NavigationGuard;
use crate::route::Location;
use std::sync::RwLock;
use tracing::{debug, error};

/// Something that can move the active route
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &Location);
}

/// In-memory history that runs the guard on every navigation
#[derive(Debug)]
pub struct MemoryNavigator {
    guard: NavigationGuard,
    history: RwLock<Vec<Location>>,
}

impl MemoryNavigator {
    pub fn new(guard: NavigationGuard) -> Self {
        Self {
            guard,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Active location, if any navigation happened yet
    pub fn current(&self) -> Option<Location> {
        self.history
            .read()
            .ok()
            .and_then(|history| history.last().cloned())
    }

    /// Every location that became active, oldest first
    pub fn history(&self) -> Vec<Location> {
        self.history
            .read()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate(&self, location: &Location) {
        let decision = match self.guard.check(location) {
            Ok(decision) => decision,
            Err(e) => {
                error!("Navigation to {location} rejected: {e}");
                return;
            }
        };

        debug!(requested = %location, active = %decision.location, "Navigated");
        if let Ok(mut history) = self.history.write() {
            history.push(decision.location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::session::Session;

    #[test]
    fn test_history_records_guarded_locations() {
        let navigator = MemoryNavigator::new(NavigationGuard::new(Session::in_memory()));
        assert!(navigator.current().is_none());

        navigator.navigate(&Location::new(Route::Register));
        navigator.navigate(&Location::new(Route::Profile));
        navigator.navigate(&Location::new(Route::Root));

        let paths: Vec<String> = navigator.history().iter().map(ToString::to_string).collect();
        assert_eq!(paths, vec!["/register", "/login", "/login"]);
    }
}
