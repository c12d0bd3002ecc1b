//! OpenAPI documentation for the JSON surface.
//!
//! Page routes are served by the shell fallback and are not part of the
//! document. The generated document backs Swagger UI in debug builds
//! and is exported by `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::health::ProbeView;
use crate::inbound::http::views::{
    AccountView, LogoutView, NavLinkView, NavigationView, SessionView, WaitView,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the portal API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "portal API",
        description = "Session, navigation and health endpoints of the role-gated portal."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::navigation::navigation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        SessionView,
        AccountView,
        NavigationView,
        NavLinkView,
        WaitView,
        LogoutView,
        ProbeView,
        Role,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "session", description = "Login, logout and the current session"),
        (name = "navigation", description = "Role-derived navigation chrome"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
