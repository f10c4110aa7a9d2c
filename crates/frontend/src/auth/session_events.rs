//! Bridge from session changes to the component tree
//!
//! Session observers must be thread-safe, component handles are not. The
//! observer registered with the session only forwards into this thread-local
//! slot, which the mounted `AuthProvider` fills.

use clinic_core::{Session, SessionEvent, SubscriptionId};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static SESSION_EVENT_CALLBACK: RefCell<Option<Rc<dyn Fn(SessionEvent)>>> = RefCell::new(None);
}

/// Set the session event callback
pub fn set_session_event_callback(callback: Rc<dyn Fn(SessionEvent)>) {
    SESSION_EVENT_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(callback);
    });
}

pub fn clear_session_event_callback() {
    SESSION_EVENT_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Forward an event to the callback, if one is set
pub fn dispatch_session_event(event: SessionEvent) {
    // Clone out of the slot so the callback may replace it
    let callback = SESSION_EVENT_CALLBACK.with(|cb| cb.borrow().clone());
    if let Some(callback) = callback {
        callback(event);
    }
}

/// Subscribe the forwarding observer to `session`
pub fn forward_session_events(session: &Session) -> SubscriptionId {
    session.subscribe(|event| dispatch_session_event(*event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::{InvalidationReason, SessionOrigin, SessionToken};
    use std::cell::Cell;

    #[test]
    fn test_events_reach_callback_until_cleared() {
        let session = Session::in_memory();
        let id = forward_session_events(&session);

        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        set_session_event_callback(Rc::new(move |_: SessionEvent| counter.set(counter.get() + 1)));

        session
            .establish(SessionToken::new("t").unwrap(), SessionOrigin::PasswordLogin)
            .unwrap();
        session.invalidate(InvalidationReason::Unauthorized).unwrap();
        assert_eq!(seen.get(), 2);

        clear_session_event_callback();
        session.invalidate(InvalidationReason::SignedOut).unwrap();
        assert_eq!(seen.get(), 2);

        session.unsubscribe(id);
    }
}
