//! Session cookie helpers.
//!
//! Wraps the Actix session so handlers deal only in [`UserId`]s. The cookie
//! carries nothing but the id; the user record is looked up on every
//! request through the directory port.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper exposing the portal's session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store `user_id` in a freshly renewed cookie.
    ///
    /// Renewal rotates the session identity at login so a cookie issued
    /// before authentication cannot be replayed afterwards.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// User id carried by the cookie, if any.
    ///
    /// A malformed id is treated as absent and dropped from the cookie.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match UserId::new(raw) {
            Ok(id) => Ok(Some(id)),
            Err(error) => {
                warn!(%error, "discarding invalid user id from session cookie");
                self.purge();
                Ok(None)
            }
        }
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
