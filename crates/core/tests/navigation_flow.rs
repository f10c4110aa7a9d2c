//! End-to-end navigation behaviour over an in-memory session

use clinic_core::{
    CallbackOutcome, CallbackParams, InvalidationReason, Location, LoginCallback,
    MemoryNavigator, NavigationGuard, Navigator, Route, Session, SessionOrigin, SessionToken,
};

fn app() -> (Session, MemoryNavigator) {
    let session = Session::in_memory();
    let navigator = MemoryNavigator::new(NavigationGuard::new(session.clone()));
    (session, navigator)
}

fn visit(navigator: &MemoryNavigator, url: &str) -> Location {
    navigator.navigate(&Location::parse(url).unwrap());
    navigator.current().unwrap()
}

#[test]
fn test_protected_pages_bounce_to_login_without_session() {
    let (_session, navigator) = app();

    assert_eq!(visit(&navigator, "/profile"), Location::login());
    assert_eq!(visit(&navigator, "/appointments"), Location::login());
    assert!(
        navigator
            .history()
            .iter()
            .all(|location| location.route == Route::Login)
    );
}

#[test]
fn test_callback_with_token_signs_in() {
    let (session, navigator) = app();

    let landing = Location::parse("/login/callback?token=abc123").unwrap();
    navigator.navigate(&landing);
    assert_eq!(navigator.current().unwrap().route, Route::LoginCallback);

    let outcome =
        LoginCallback::complete(CallbackParams::from_location(&landing), &session, &navigator);

    assert_eq!(outcome, CallbackOutcome::Authenticated);
    assert_eq!(session.token().unwrap().as_str(), "abc123");
    assert_eq!(navigator.current().unwrap().to_string(), "/appointments");
}

#[test]
fn test_callback_with_error_returns_to_login_with_code() {
    let (session, navigator) = app();

    let landing = Location::parse("/login/callback?error=google_auth_failed").unwrap();
    let outcome =
        LoginCallback::complete(CallbackParams::from_location(&landing), &session, &navigator);

    assert_eq!(outcome, CallbackOutcome::Failed("google_auth_failed".into()));
    let current = navigator.current().unwrap();
    assert_eq!(current.route, Route::Login);
    assert_eq!(current.query_value("error"), Some("google_auth_failed"));
    assert!(session.token().is_none());
}

#[test]
fn test_signing_out_locks_protected_pages_again() {
    let (session, navigator) = app();
    session
        .establish(SessionToken::new("abc123").unwrap(), SessionOrigin::PasswordLogin)
        .unwrap();

    assert_eq!(visit(&navigator, "/profile").route, Route::Profile);

    session.invalidate(InvalidationReason::SignedOut).unwrap();
    assert_eq!(visit(&navigator, "/profile"), Location::login());
}

#[test]
fn test_root_always_lands_on_login() {
    let (session, navigator) = app();
    assert_eq!(visit(&navigator, "/"), Location::login());

    session
        .establish(SessionToken::new("abc123").unwrap(), SessionOrigin::PasswordLogin)
        .unwrap();
    assert_eq!(visit(&navigator, "/"), Location::login());
}
