//! Clinic client core: session context, routes and navigation guard

pub mod callback;
pub mod config;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod route;
pub mod session;

pub use callback::{CallbackOutcome, CallbackParams, LoginCallback};
pub use config::ClientConfig;
pub use error::{CoreError, CoreResult};
pub use guard::{NavigationDecision, NavigationGuard, NavigationOutcome};
pub use navigation::{MemoryNavigator, Navigator};
pub use route::{Location, Route, RouteAccess};
pub use session::{
    InvalidationReason, MemorySessionStore, Session, SessionEvent, SessionOrigin, SessionStore,
    SessionToken, SubscriptionId,
};
