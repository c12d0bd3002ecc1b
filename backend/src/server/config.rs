//! Server settings and the configuration handed to [`super::create_server`].

use std::net::SocketAddr;
use std::time::Duration;

use mockable::Env;
use tracing::warn;

use crate::inbound::http::session_config::{BuildMode, SessionSettings, fallback_or_error};

pub(crate) const BIND_ADDR_ENV: &str = "PORTAL_BIND_ADDR";
pub(crate) const RESOLVE_TIMEOUT_ENV: &str = "SESSION_RESOLVE_TIMEOUT_MS";
pub(crate) const BRAND_ENV: &str = "PORTAL_BRAND";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(5_000);
const DEFAULT_BRAND: &str = "BBA Premium";

/// Errors raised while reading server settings.
#[derive(thiserror::Error, Debug)]
pub enum ServerConfigError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Listener and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// `None` when resolution is unbounded (`SESSION_RESOLVE_TIMEOUT_MS=0`).
    pub resolve_timeout: Option<Duration>,
    pub brand: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            resolve_timeout: Some(DEFAULT_RESOLVE_TIMEOUT),
            brand: DEFAULT_BRAND.to_owned(),
        }
    }
}

/// Read server settings. Unset variables take their defaults; malformed ones
/// are fatal in release builds.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use portal::inbound::http::session_config::BuildMode;
/// use portal::server::server_settings_from_env;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_RESOLVE_TIMEOUT_MS" => Some("0".to_owned()),
///     _ => None,
/// });
/// let settings = server_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.resolve_timeout, None);
/// assert_eq!(settings.bind_addr.port(), 8080);
/// ```
pub fn server_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<ServerSettings, ServerConfigError> {
    let defaults = ServerSettings::default();
    let bind_addr = match env.string(BIND_ADDR_ENV) {
        Some(raw) => match raw.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(_) => invalid(mode, BIND_ADDR_ENV, raw, "host:port", defaults.bind_addr)?,
        },
        None => defaults.bind_addr,
    };
    let resolve_timeout = match env.string(RESOLVE_TIMEOUT_ENV) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(_) => invalid(
                mode,
                RESOLVE_TIMEOUT_ENV,
                raw,
                "milliseconds (0 disables)",
                defaults.resolve_timeout,
            )?,
        },
        None => defaults.resolve_timeout,
    };
    let brand = env
        .string(BRAND_ENV)
        .map(|raw| raw.trim().to_owned())
        .filter(|brand| !brand.is_empty())
        .unwrap_or(defaults.brand);
    Ok(ServerSettings {
        bind_addr,
        resolve_timeout,
        brand,
    })
}

fn invalid<T>(
    mode: BuildMode,
    name: &'static str,
    value: String,
    expected: &'static str,
    fallback: T,
) -> Result<T, ServerConfigError> {
    let logged = value.clone();
    fallback_or_error(
        mode,
        fallback,
        ServerConfigError::InvalidEnv {
            name,
            value,
            expected,
        },
        || warn!(name, value = %logged, "invalid server setting; using default"),
    )
}

/// Everything needed to start the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) settings: ServerSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, settings: ServerSettings) -> Self {
        Self { session, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn env_of(vars: &[(&'static str, &str)]) -> MockEnv {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(name, value)| (*name, (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_when_unset(#[values(BuildMode::Debug, BuildMode::Release)] mode: BuildMode) {
        let settings = server_settings_from_env(&env_of(&[]), mode).expect("defaults");
        assert_eq!(settings, ServerSettings::default());
        assert_eq!(settings.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(settings.resolve_timeout, Some(Duration::from_secs(5)));
        assert_eq!(settings.brand, "BBA Premium");
    }

    #[rstest]
    fn reads_explicit_values() {
        let env = env_of(&[
            (BIND_ADDR_ENV, "127.0.0.1:9000"),
            (RESOLVE_TIMEOUT_ENV, "250"),
            (BRAND_ENV, "  Portal Cabang "),
        ]);
        let settings = server_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(settings.resolve_timeout, Some(Duration::from_millis(250)));
        assert_eq!(settings.brand, "Portal Cabang");
    }

    #[rstest]
    fn zero_timeout_disables_the_bound() {
        let env = env_of(&[(RESOLVE_TIMEOUT_ENV, "0")]);
        let settings = server_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert_eq!(settings.resolve_timeout, None);
    }

    #[rstest]
    #[case(BIND_ADDR_ENV, "localhost")]
    #[case(RESOLVE_TIMEOUT_ENV, "-5")]
    #[case(RESOLVE_TIMEOUT_ENV, "soon")]
    fn release_rejects_malformed_values(#[case] name: &'static str, #[case] value: &str) {
        let err = server_settings_from_env(&env_of(&[(name, value)]), BuildMode::Release)
            .expect_err("malformed value");
        let ServerConfigError::InvalidEnv { name: rejected, .. } = err;
        assert_eq!(rejected, name);
    }

    #[rstest]
    fn debug_falls_back_on_malformed_values() {
        let env = env_of(&[(BIND_ADDR_ENV, "nowhere"), (RESOLVE_TIMEOUT_ENV, "x")]);
        let settings = server_settings_from_env(&env, BuildMode::Debug).expect("fallback");
        assert_eq!(settings, ServerSettings::default());
    }

    #[rstest]
    fn blank_brand_uses_default() {
        let env = env_of(&[(BRAND_ENV, "   ")]);
        let settings = server_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert_eq!(settings.brand, "BBA Premium");
    }
}
