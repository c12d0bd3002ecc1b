//! Value parsing shared by the session toggles.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Return `fallback` after `warn` in debug builds, `error` otherwise.
pub(crate) fn fallback_or_error<T, E>(
    mode: BuildMode,
    fallback: T,
    error: E,
    warn: impl FnOnce(),
) -> Result<T, E> {
    if mode.is_debug() {
        warn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// A boolean environment toggle with its debug-build default.
pub(super) struct BoolToggle {
    name: &'static str,
    default: bool,
}

impl BoolToggle {
    pub(super) const fn new(name: &'static str, default: bool) -> Self {
        Self { name, default }
    }

    pub(super) fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
        let Self { name, default } = *self;
        let Some(value) = env.string(name) else {
            return fallback_or_error(mode, default, SessionConfigError::MissingEnv { name }, || {
                warn!(name, default, "toggle not set; using default");
            });
        };
        if let Some(flag) = parse_bool(&value) {
            return Ok(flag);
        }
        let error = SessionConfigError::InvalidEnv {
            name,
            value: value.clone(),
            expected: BOOL_EXPECTED,
        };
        fallback_or_error(mode, default, error, || {
            warn!(name, value = %value, default, "invalid toggle; using default");
        })
    }
}

pub(super) fn parse_same_site(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    default: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            fallback_or_error(mode, default, error, || {
                warn!(value = %value, "invalid SESSION_SAMESITE; using default");
            })
        }
    }
}
