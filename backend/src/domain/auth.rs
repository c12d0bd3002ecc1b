//! Login credentials and authentication failures.
//!
//! Inbound payloads are validated here before any port sees them, so the
//! authentication backend only ever receives well-formed credentials.

use std::fmt;

use zeroize::Zeroizing;

use super::Error;

/// Shape errors in a login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim; it is wiped on drop.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Failure reported by the authentication backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Shown to the user at the login
    /// form.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The backend could not be reached or answered garbage.
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials => Self::unauthorized(value.to_string()),
            AuthError::Unavailable(_) => Self::service_unavailable(value.to_string()),
        }
    }
}
