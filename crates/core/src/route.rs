//! Static route table and locations

use crate::error::{CoreError, CoreResult};
use std::fmt;
use url::Url;
use url::form_urlencoded;

/// Whether a route may be entered without a stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    RequiresSession,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Profile,
    Appointments,
    LoginCallback,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Root,
        Route::Login,
        Route::Register,
        Route::Profile,
        Route::Appointments,
        Route::LoginCallback,
        Route::NotFound,
    ];

    /// Where a freshly authenticated user lands
    pub const DEFAULT_AUTHENTICATED: Route = Route::Appointments;

    pub fn path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Profile => "/profile",
            Route::Appointments => "/appointments",
            Route::LoginCallback => "/login/callback",
            Route::NotFound => "/404",
        }
    }

    pub fn access(self) -> RouteAccess {
        match self {
            Route::Profile | Route::Appointments => RouteAccess::RequiresSession,
            Route::Root
            | Route::Login
            | Route::Register
            | Route::LoginCallback
            | Route::NotFound => RouteAccess::Public,
        }
    }

    /// Unconditional redirect attached to the route, if any
    pub fn redirect(self) -> Option<Route> {
        match self {
            Route::Root => Some(Route::Login),
            _ => None,
        }
    }

    /// Match a path, ignoring a trailing slash. Unknown paths map to `NotFound`.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL
            .into_iter()
            .filter(|route| *route != Route::NotFound)
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::NotFound)
    }
}

/// A route plus its query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub query: Vec<(String, String)>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            query: Vec::new(),
        }
    }

    pub fn login() -> Self {
        Self::new(Route::Login)
    }

    /// Append a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parse `path[?query]`, or a full URL whose path and query are used
    pub fn parse(input: &str) -> CoreResult<Self> {
        let base = Url::parse("http://localhost/")
            .map_err(|e| CoreError::invalid_location(e.to_string()))?;
        let url = base
            .join(input)
            .map_err(|e| CoreError::invalid_location(format!("{input}: {e}")))?;

        Ok(Self {
            route: Route::from_path(url.path()),
            query: url.query_pairs().into_owned().collect(),
        })
    }
}

impl From<Route> for Location {
    fn from(route: Route) -> Self {
        Self::new(route)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route.path())?;
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
