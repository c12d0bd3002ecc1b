//! Navigation API handler.
//!
//! ```text
//! GET /api/v1/navigation?path=/admin/users
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::{Error, HOME_PATH};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::shell::wait_response;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{NavigationView, WaitView};

/// Query for `GET /api/v1/navigation`.
#[derive(Debug, Deserialize)]
pub struct NavigationQuery {
    pub path: Option<String>,
}

/// Header navigation for the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    params(
        ("path" = Option<String>, Query, description = "Path used to pick the active item; defaults to the dashboard")
    ),
    responses(
        (status = 200, description = "Navigation items", body = NavigationView),
        (status = 401, description = "No user signed in", body = Error),
        (status = 503, description = "Session still loading", body = WaitView)
    ),
    tags = ["navigation"],
    operation_id = "navigation"
)]
#[get("/navigation")]
pub async fn navigation(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NavigationQuery>,
) -> ApiResult<HttpResponse> {
    let store = state.resolve_session(&session).await?;
    let current = store.session();
    if current.is_loading() {
        return Ok(wait_response());
    }
    let user = current
        .user()
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let path = query.path.as_deref().unwrap_or(HOME_PATH);
    Ok(HttpResponse::Ok().json(NavigationView::for_role(user.role(), path)))
}
