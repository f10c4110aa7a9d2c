//! Global authentication context and provider

use super::session_events::{
    clear_session_event_callback, forward_session_events, set_session_event_callback,
};
use crate::client::session;
use crate::config::FrontendConfig;
use clinic_core::{InvalidationReason, SessionEvent};
use std::rc::Rc;
use yew::prelude::*;

/// What the UI knows about the session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthContextData {
    pub is_authenticated: bool,
    /// One-off message for the login page
    pub notice: Option<String>,
}

pub enum AuthAction {
    Session(SessionEvent),
    DismissNotice,
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthContextData>;

impl AuthContextData {
    fn from_session() -> Self {
        Self {
            is_authenticated: session().is_active(),
            notice: None,
        }
    }
}

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Session(SessionEvent::Established(_)) => Rc::new(Self {
                is_authenticated: true,
                notice: None,
            }),
            AuthAction::Session(SessionEvent::Invalidated(InvalidationReason::Unauthorized)) => {
                Rc::new(Self {
                    is_authenticated: false,
                    notice: Some(FrontendConfig::SESSION_EXPIRED_NOTICE.to_string()),
                })
            }
            AuthAction::Session(SessionEvent::Invalidated(InvalidationReason::SignedOut)) => {
                Rc::new(Self::default())
            }
            AuthAction::DismissNotice => Rc::new(Self {
                notice: None,
                ..(*self).clone()
            }),
        }
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth_state = use_reducer(AuthContextData::from_session);

    // Mirror session changes made anywhere, including the 401 interceptor
    {
        let auth_state = auth_state.clone();
        use_effect_with((), move |_| {
            set_session_event_callback(Rc::new(move |event: SessionEvent| {
                auth_state.dispatch(AuthAction::Session(event));
            }));
            let session = session();
            let subscription = forward_session_events(&session);

            move || {
                session.unsubscribe(subscription);
                clear_session_event_callback();
            }
        });
    }

    html! {
        <ContextProvider<AuthContext> context={auth_state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.is_authenticated
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::SessionOrigin;

    fn reduce(state: AuthContextData, action: AuthAction) -> AuthContextData {
        (*Rc::new(state).reduce(action)).clone()
    }

    #[test]
    fn test_unauthorized_sets_expired_notice() {
        let signed_in = AuthContextData {
            is_authenticated: true,
            notice: None,
        };
        let state = reduce(
            signed_in,
            AuthAction::Session(SessionEvent::Invalidated(InvalidationReason::Unauthorized)),
        );
        assert!(!state.is_authenticated);
        assert_eq!(
            state.notice.as_deref(),
            Some(FrontendConfig::SESSION_EXPIRED_NOTICE)
        );

        let state = reduce(state, AuthAction::DismissNotice);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn test_sign_out_is_silent_and_login_clears_notice() {
        let expired = AuthContextData {
            is_authenticated: false,
            notice: Some("old".into()),
        };
        let state = reduce(
            expired,
            AuthAction::Session(SessionEvent::Established(SessionOrigin::IdentityProvider)),
        );
        assert_eq!(
            state,
            AuthContextData {
                is_authenticated: true,
                notice: None
            }
        );

        let state = reduce(
            state,
            AuthAction::Session(SessionEvent::Invalidated(InvalidationReason::SignedOut)),
        );
        assert_eq!(state, AuthContextData::default());
    }
}
