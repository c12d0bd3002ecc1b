//! Role-gated portal: session handling, route guards, navigation and the
//! page shell served over actix-web.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
