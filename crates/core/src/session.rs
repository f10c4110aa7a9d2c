//! Session context shared by the request layer and the navigation layer
//!
//! The stored credential is only ever written through [`Session::establish`]
//! (authentication flows) and [`Session::invalidate`] (401 handling and sign
//! out). Everything else reads.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Opaque bearer credential issued by the backend
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token, rejecting empty values
    pub fn new(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CoreError::InvalidToken);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Persistence backend for the single stored credential
pub trait SessionStore: Send + Sync {
    /// Read the stored credential, if any
    fn load(&self) -> CoreResult<Option<SessionToken>>;

    /// Replace the stored credential
    fn save(&self, token: &SessionToken) -> CoreResult<()>;

    /// Remove the stored credential
    fn clear(&self) -> CoreResult<()>;
}

/// In-memory store, used by tests and embedders without persistence
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a credential already stored
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> CoreResult<Option<SessionToken>> {
        self.token
            .read()
            .map(|token| token.clone())
            .map_err(|_| CoreError::storage("memory store lock poisoned"))
    }

    fn save(&self, token: &SessionToken) -> CoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| CoreError::storage("memory store lock poisoned"))?;
        *slot = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        let mut slot = self
            .token
            .write()
            .map_err(|_| CoreError::storage("memory store lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

/// How a credential came to be stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Email and password login against the backend
    PasswordLogin,
    /// Redirect back from an external identity provider
    IdentityProvider,
}

/// Why a credential was deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidationReason {
    /// The backend answered 401
    Unauthorized,
    /// The user signed out or deleted the account
    SignedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Established(SessionOrigin),
    Invalidated(InvalidationReason),
}

/// Handle returned by [`Session::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct SessionInner {
    store: Box<dyn SessionStore>,
    observers: RwLock<BTreeMap<SubscriptionId, Observer>>,
    next_id: AtomicU64,
}

/// Explicit session context, cheap to clone
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                observers: RwLock::new(BTreeMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Session backed by a fresh [`MemorySessionStore`]
    pub fn in_memory() -> Self {
        Self::new(MemorySessionStore::new())
    }

    /// Current credential. A failing store reads as "no credential".
    pub fn token(&self) -> Option<SessionToken> {
        match self.inner.store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read session token: {e}");
                None
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.token().is_some()
    }

    /// Store a credential obtained by an authentication flow
    pub fn establish(&self, token: SessionToken, origin: SessionOrigin) -> CoreResult<()> {
        self.inner.store.save(&token)?;
        info!(?origin, "Session established");
        self.notify(&SessionEvent::Established(origin));
        Ok(())
    }

    /// Delete the stored credential
    pub fn invalidate(&self, reason: InvalidationReason) -> CoreResult<()> {
        self.inner.store.clear()?;
        info!(?reason, "Session invalidated");
        self.notify(&SessionEvent::Invalidated(reason));
        Ok(())
    }

    /// Register an observer for session changes
    pub fn subscribe(&self, observer: impl Fn(&SessionEvent) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        match self.inner.observers.write() {
            Ok(mut observers) => {
                observers.insert(id, Arc::new(observer));
            }
            Err(_) => warn!("Session observer registry poisoned, observer dropped"),
        }
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut observers) = self.inner.observers.write() {
            observers.remove(&id);
        }
    }

    fn notify(&self, event: &SessionEvent) {
        // Snapshot first so observers may subscribe or unsubscribe re-entrantly
        let observers: Vec<Observer> = match self.inner.observers.read() {
            Ok(observers) => observers.values().cloned().collect(),
            Err(_) => return,
        };
        for observer in observers {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_token_rejects_empty() {
        assert_eq!(SessionToken::new(""), Err(CoreError::InvalidToken));
        assert_eq!(SessionToken::new("   "), Err(CoreError::InvalidToken));
        assert!(SessionToken::new("abc123").is_ok());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = SessionToken::new("secret-value").unwrap();
        assert!(!format!("{token:?}").contains("secret-value"));
        assert_eq!(token.bearer(), "Bearer secret-value");
    }

    #[test]
    fn test_establish_replaces_previous_token() {
        let session = Session::in_memory();
        assert!(!session.is_active());

        session
            .establish(SessionToken::new("first").unwrap(), SessionOrigin::PasswordLogin)
            .unwrap();
        session
            .establish(SessionToken::new("second").unwrap(), SessionOrigin::IdentityProvider)
            .unwrap();

        assert_eq!(session.token().unwrap().as_str(), "second");
    }

    #[test]
    fn test_invalidate_clears_token() {
        let session = Session::new(MemorySessionStore::with_token(
            SessionToken::new("abc").unwrap(),
        ));
        assert!(session.is_active());

        session.invalidate(InvalidationReason::Unauthorized).unwrap();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::in_memory();
        let other = session.clone();
        session
            .establish(SessionToken::new("shared").unwrap(), SessionOrigin::PasswordLogin)
            .unwrap();
        assert_eq!(other.token().unwrap().as_str(), "shared");
    }

    #[test]
    fn test_observers_receive_events_until_unsubscribed() {
        let session = Session::in_memory();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let id = {
            let seen = seen.clone();
            session.subscribe(move |event| seen.lock().unwrap().push(*event))
        };

        session
            .establish(SessionToken::new("t").unwrap(), SessionOrigin::IdentityProvider)
            .unwrap();
        session.invalidate(InvalidationReason::SignedOut).unwrap();
        session.unsubscribe(id);
        session
            .establish(SessionToken::new("t2").unwrap(), SessionOrigin::PasswordLogin)
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                SessionEvent::Established(SessionOrigin::IdentityProvider),
                SessionEvent::Invalidated(InvalidationReason::SignedOut),
            ]
        );
    }

    struct FailingStore;

    impl SessionStore for FailingStore {
        fn load(&self) -> CoreResult<Option<SessionToken>> {
            Err(CoreError::storage("unavailable"))
        }

        fn save(&self, _token: &SessionToken) -> CoreResult<()> {
            Err(CoreError::storage("unavailable"))
        }

        fn clear(&self) -> CoreResult<()> {
            Err(CoreError::storage("unavailable"))
        }
    }

    #[test]
    fn test_failing_store_reads_as_signed_out() {
        let session = Session::new(FailingStore);
        assert!(session.token().is_none());
        assert!(matches!(
            session.establish(SessionToken::new("x").unwrap(), SessionOrigin::PasswordLogin),
            Err(CoreError::Storage { .. })
        ));
    }
}
