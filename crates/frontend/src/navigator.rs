//! History-backed navigation for code outside the component tree

use clinic_core::{Location, Navigator};
use tracing::debug;
use yew_router::history::{BrowserHistory, History};

/// Pushes locations onto the browser history
///
/// The router listens to the same history, so the guard runs again on the
/// pushed location when the `Switch` re-renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    /// Swap the current history entry for `location`
    ///
    /// Used for guard redirects so Back never lands on the blocked page.
    pub fn replace(&self, location: &Location) {
        debug!(%location, "Replacing location");
        BrowserHistory::new().replace(location.to_string());
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, location: &Location) {
        debug!(%location, "Navigating");
        BrowserHistory::new().push(location.to_string());
    }
}
