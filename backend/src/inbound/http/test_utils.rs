//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::ports::{
    FixtureLoginService, FixtureUserDirectory, MockLoginService, MockUserDirectory,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Cookie name used by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = crate::server::SESSION_COOKIE_NAME;

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// State over the fixture accounts with unbounded resolution.
pub fn fixture_state() -> HttpState {
    HttpState::new(
        HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            directory: Arc::new(FixtureUserDirectory),
        },
        None,
        "BBA Premium",
    )
}

/// State over mocked ports.
pub fn mock_state(login: MockLoginService, directory: MockUserDirectory) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            login: Arc::new(login),
            directory: Arc::new(directory),
        },
        None,
        "BBA Premium",
    )
}

/// Session cookie set on `res`; panics when absent.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
