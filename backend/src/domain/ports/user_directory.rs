//! Driven port resolving a session's user id back into a [`User`].
//!
//! This is the asynchronous check run when a session is first read; while it
//! is pending the session stays in the loading state.

use async_trait::async_trait;

use super::fixture_accounts::fixture_accounts;
use crate::domain::{AuthError, User, UserId};

/// Lookup of issued users by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the user for `id`, or `None` when the id is no longer known.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, AuthError>;
}

/// Directory over the fixture accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        for account in fixture_accounts() {
            let user = account
                .user()
                .map_err(|err| AuthError::Unavailable(format!("invalid fixture account: {err}")))?;
            if user.id() == id {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}
