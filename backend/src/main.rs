//! Portal entry-point: reads configuration, then serves the API and page
//! shell until shutdown.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use portal::inbound::http::health::HealthState;
use portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
use portal::server::{ServerConfig, create_server, server_settings_from_env};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let mode = BuildMode::from_debug_assertions();
    let session = session_settings_from_env(&env, mode).map_err(std::io::Error::other)?;
    let settings = server_settings_from_env(&env, mode).map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(session, settings))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
