//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever touch domain
//! ports, so tests can swap in mocks without any I/O.

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tracing::{debug, warn};

use super::session::SessionContext;
use crate::domain::ports::{LoginService, UserDirectory};
use crate::domain::{AuthError, Error, SessionStore, UserId};

/// Port implementations bundled for [`HttpState::new`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub directory: Arc<dyn UserDirectory>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub directory: Arc<dyn UserDirectory>,
    /// Upper bound on directory lookups; `None` waits indefinitely.
    pub resolve_timeout: Option<Duration>,
    /// Product name shown in the shell header.
    pub brand: String,
}

impl HttpState {
    /// Construct state from ports and presentation settings.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use portal::domain::ports::{FixtureLoginService, FixtureUserDirectory};
    /// use portal::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     directory: Arc::new(FixtureUserDirectory),
    /// };
    /// let state = HttpState::new(ports, Some(Duration::from_secs(5)), "BBA Premium");
    /// assert!(state.session_store().session().is_loading());
    /// ```
    pub fn new(
        ports: HttpStatePorts,
        resolve_timeout: Option<Duration>,
        brand: impl Into<String>,
    ) -> Self {
        let HttpStatePorts { login, directory } = ports;
        Self {
            login,
            directory,
            resolve_timeout,
            brand: brand.into(),
        }
    }

    /// Fresh store for one request, still loading.
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(Arc::clone(&self.login), Arc::clone(&self.directory))
    }

    /// Build a store and settle it from the request's cookie.
    ///
    /// A lookup that times out or fails leaves the store loading; callers
    /// answer with a wait state rather than an error. An id the directory no
    /// longer knows is removed from the cookie.
    pub async fn resolve_session(&self, cookie: &SessionContext) -> Result<SessionStore, Error> {
        let user_id = cookie.user_id()?;
        let mut store = self.session_store();
        let lookup = store.resolve(user_id.as_ref());
        let outcome = match self.resolve_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup).await.ok(),
            None => Some(lookup.await),
        }
        .map(|resolved| resolved.map(|session| session.user().is_some()));
        if outcome.is_none() {
            warn!(timeout = ?self.resolve_timeout, "session resolution timed out");
        }
        settle(cookie, user_id.as_ref(), outcome);
        Ok(store)
    }

    /// Settle the session only if the directory answers without suspending.
    ///
    /// Pages without a guard and logout never wait on the directory: a
    /// pending lookup is dropped and the store stays loading.
    pub fn peek_session(&self, cookie: &SessionContext) -> Result<SessionStore, Error> {
        let user_id = cookie.user_id()?;
        let mut store = self.session_store();
        let outcome = store
            .resolve(user_id.as_ref())
            .now_or_never()
            .map(|resolved| resolved.map(|session| session.user().is_some()));
        if outcome.is_none() {
            debug!("session lookup pending; not waiting");
        }
        settle(cookie, user_id.as_ref(), outcome);
        Ok(store)
    }
}

fn settle(
    cookie: &SessionContext,
    user_id: Option<&UserId>,
    outcome: Option<Result<bool, AuthError>>,
) {
    match outcome {
        None => {}
        Some(Err(error)) => warn!(%error, "session resolution failed"),
        Some(Ok(has_user)) => {
            if user_id.is_some() && !has_user {
                cookie.purge();
            }
        }
    }
}
