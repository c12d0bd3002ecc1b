//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerConfigError, ServerSettings, server_settings_from_env};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{FixtureLoginService, FixtureUserDirectory};
use crate::inbound::http::auth::{current_session, login, logout};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::navigation::navigation;
use crate::inbound::http::shell::render_shell;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Shared state and cookie settings for one application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble the application: API scope, probes, docs in debug builds and the
/// page shell as the default service.
///
/// Sessions wrap the whole app because page navigations read the cookie
/// too. [`Trace`] is registered last so it runs outermost.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .service(login)
        .service(logout)
        .service(current_session)
        .service(navigation);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(render_shell))
        .wrap(session)
        .wrap(Trace)
}

/// Bind the listener and start serving.
///
/// Readiness flips once the socket is bound. The returned [`Server`] must be
/// awaited to drive it.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig { session, settings } = config;
    info!(
        fingerprint = %session.fingerprint(),
        bind_addr = %settings.bind_addr,
        resolve_timeout = ?settings.resolve_timeout,
        "starting portal"
    );

    let http_state = web::Data::new(HttpState::new(
        HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            directory: Arc::new(FixtureUserDirectory),
        },
        settings.resolve_timeout,
        settings.brand,
    ));
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        key: session.key,
        cookie_secure: session.cookie_secure,
        same_site: session.same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(settings.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
