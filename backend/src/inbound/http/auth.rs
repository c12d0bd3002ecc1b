//! Session API handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::domain::{AuthError, Error, LOGIN_PATH, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{LogoutView, SessionView};

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
///
/// On success the cookie is renewed and carries the user's id; the body is
/// the settled session. Failed attempts leave any existing session intact.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionView, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Authentication backend unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionView>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let mut store = state.session_store();
    let user = store.login(&credentials).await.map_err(|err| {
        if matches!(err, AuthError::InvalidCredentials) {
            warn!(username = credentials.username(), "login rejected");
        }
        Error::from(err)
    })?;
    session.persist_user(user.id())?;
    Ok(web::Json(SessionView::from(store.session())))
}

/// End the session and point the client at the login page.
///
/// Never waits on the user directory.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Session cleared", body = LogoutView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LogoutView>> {
    let mut store = state.peek_session(&session)?;
    store.logout();
    session.purge();
    Ok(web::Json(LogoutView {
        redirect: LOGIN_PATH,
    }))
}

/// Current session state.
///
/// `isLoading` stays true when the user directory did not answer in time.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionView>> {
    let store = state.resolve_session(&session).await?;
    Ok(web::Json(SessionView::from(store.session())))
}
