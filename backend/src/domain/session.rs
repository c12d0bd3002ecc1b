//! Session state and the store that owns it.
//!
//! A [`SessionStore`] is built per request from injected ports and starts in
//! the loading state. It leaves that state only when [`SessionStore::resolve`]
//! completes or an explicit login/logout happens; guards and the navigation
//! model only read the resulting [`Session`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use super::ports::{LoginService, UserDirectory};
use super::{AuthError, LoginCredentials, User, UserId};

/// Authentication state of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    user: Option<User>,
    is_loading: bool,
}

impl Session {
    /// Session with explicit fields.
    #[must_use]
    pub const fn new(user: Option<User>, is_loading: bool) -> Self {
        Self { user, is_loading }
    }

    /// Unresolved session: the user is not known yet.
    #[must_use]
    pub const fn loading() -> Self {
        Self::new(None, true)
    }

    /// Settled session, with or without a user.
    #[must_use]
    pub const fn resolved(user: Option<User>) -> Self {
        Self::new(user, false)
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }
}

/// Owner of a [`Session`] and the only place it is mutated.
pub struct SessionStore {
    login: Arc<dyn LoginService>,
    directory: Arc<dyn UserDirectory>,
    session: Session,
}

impl SessionStore {
    /// Create a store in the loading state.
    pub fn new(login: Arc<dyn LoginService>, directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            login,
            directory,
            session: Session::loading(),
        }
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Settle the session from the id carried by the client, if any.
    ///
    /// Ids the directory no longer knows resolve to "no user". On error, or
    /// if the returned future is dropped early, the session stays loading.
    pub async fn resolve(&mut self, user_id: Option<&UserId>) -> Result<&Session, AuthError> {
        let user = match user_id {
            Some(id) => {
                let found = self.directory.find_user(id).await?;
                if found.is_none() {
                    debug!(user_id = %id, "session refers to unknown user");
                }
                found
            }
            None => None,
        };
        self.session = Session::resolved(user);
        Ok(&self.session)
    }

    /// Authenticate and make the returned user current.
    ///
    /// A failed attempt leaves the session untouched.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<User, AuthError> {
        let user = self.login.authenticate(credentials).await?;
        info!(user_id = %user.id(), role = %user.role(), "login succeeded");
        self.session = Session::resolved(Some(user.clone()));
        Ok(user)
    }

    /// Clear the current user, returning it.
    pub fn logout(&mut self) -> Option<User> {
        let previous = std::mem::replace(&mut self.session, Session::resolved(None));
        if let Some(user) = previous.user() {
            info!(user_id = %user.id(), "logout");
        }
        previous.user
    }
}
