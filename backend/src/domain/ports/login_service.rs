//! Driving port for credential checks.
//!
//! The session store calls this port on login without knowing which backend
//! answers. Handler tests substitute the fixture or a mock.

use async_trait::async_trait;
use tracing::debug;

use super::fixture_accounts::{FIXTURE_PASSWORD, fixture_accounts};
use crate::domain::{AuthError, LoginCredentials, User};

/// Authentication backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the user they belong to.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, AuthError>;
}

/// In-memory authenticator over the fixture accounts.
///
/// Every account (`cabang`, `wilayah`, `kota`, `admin`) accepts the password
/// `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let Some(account) = fixture_accounts()
            .iter()
            .find(|account| account.username == credentials.username())
        else {
            debug!(username = credentials.username(), "unknown fixture account");
            return Err(AuthError::InvalidCredentials);
        };
        if credentials.password() != FIXTURE_PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        account
            .user()
            .map_err(|err| AuthError::Unavailable(format!("invalid fixture account: {err}")))
    }
}
