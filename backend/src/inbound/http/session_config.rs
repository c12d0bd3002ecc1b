//! Session cookie configuration.
//!
//! Reads the cookie toggles and signing key from the environment. Release
//! builds insist on explicit, valid values; debug builds log a warning and
//! fall back to development defaults so a bare `cargo run` works.

mod fingerprint;
mod parsing;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

pub use self::fingerprint::KeyFingerprint;
use self::parsing::{BoolToggle, parse_same_site};
pub(crate) use self::parsing::fallback_or_error;

pub(crate) const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
pub(crate) const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
pub(crate) const SAMESITE_ENV: &str = "SESSION_SAMESITE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
/// Minimum key length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Whether configuration problems are fatal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Warn and fall back to defaults.
    Debug,
    /// Reject missing or invalid values.
    Release,
}

impl BuildMode {
    /// Mode matching how this binary was compiled.
    ///
    /// # Examples
    /// ```
    /// use portal::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub(crate) fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Loggable identifier of the signing key.
    #[must_use]
    pub fn fingerprint(&self) -> KeyFingerprint {
        KeyFingerprint::of(&self.key)
    }
}

/// Reasons the session configuration was rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from the environment.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// // Debug builds default every toggle and generate a throwaway key.
/// let settings = session_settings_from_env(&env, BuildMode::Debug).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = BoolToggle::new(COOKIE_SECURE_ENV, true).read(env, mode)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    // Debug builds always fall back to a generated key; release builds never.
    let allow_ephemeral = BoolToggle::new(ALLOW_EPHEMERAL_ENV, false).read(env, mode)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = key_from_env(env, mode)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    match env.string(SAMESITE_ENV) {
        Some(value) => parse_same_site(value, mode, cookie_secure, default),
        None => fallback_or_error(
            mode,
            default,
            SessionConfigError::MissingEnv { name: SAMESITE_ENV },
            || warn!("SESSION_SAMESITE not set; using default"),
        ),
    }
}

fn key_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let result = if length >= SESSION_KEY_MIN_LEN {
                Ok(Key::derive_from(&bytes))
            } else if mode.is_debug() {
                warn!(path = %path.display(), length, "session key too short; using temporary key");
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                })
            };
            bytes.zeroize();
            result
        }
        Err(source) if mode.is_debug() => {
            warn!(path = %path.display(), error = %source, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}
