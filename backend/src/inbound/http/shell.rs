//! Application shell.
//!
//! Registered as the default service: any GET that no API route claims is a
//! page navigation. The path is matched against the route table.
//!
//! Pages without a guard (login, not-found) render at once, with chrome only
//! when the session settles without waiting; not-found answers `404`.
//! Guarded pages wait for the session and answer with one of:
//!
//! - `200` with the framed page,
//! - `303` to the guard's redirect target,
//! - `503` with `Retry-After` while the session is still loading.

use actix_web::http::{Method, StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{debug, info};

use crate::domain::{Error, PageKind, match_route};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{RedirectView, ShellOutcome, ShellView, WaitView};

const API_PREFIX: &str = "/api/";

/// Placeholder answer while the session is unresolved.
pub(crate) fn wait_response() -> HttpResponse {
    HttpResponse::ServiceUnavailable()
        .insert_header((header::RETRY_AFTER, "1"))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(WaitView::LOADING)
}

fn redirect_response(redirect: RedirectView) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, redirect.redirect))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(redirect)
}

fn render_response(view: &ShellView) -> HttpResponse {
    let status = if view.page.name == PageKind::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    HttpResponse::build(status).json(view)
}

/// Render the page at the request path.
pub async fn render_shell(
    request: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let path = request.path();
    if path.starts_with(API_PREFIX) {
        return Err(Error::not_found(format!("no endpoint at {path}")));
    }
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return Err(Error::not_found(format!("no {} handler for {path}", request.method())));
    }

    let route = match_route(path);
    let Some(guard) = route.guard else {
        let store = state.peek_session(&session)?;
        let view = ShellView::compose(&state.brand, &route, store.session(), path);
        return Ok(render_response(&view));
    };
    let store = state.resolve_session(&session).await?;
    let current = store.session();

    match ShellOutcome::decide(guard.evaluate(current), &state.brand, &route, current, path) {
        ShellOutcome::Wait => {
            debug!(path, "session loading; answering with placeholder");
            Ok(wait_response())
        }
        ShellOutcome::Redirect(redirect) => {
            info!(path, location = redirect.redirect, reason = ?redirect.reason, "guard redirect");
            Ok(redirect_response(redirect))
        }
        ShellOutcome::Render(view) => Ok(render_response(&view)),
    }
}
