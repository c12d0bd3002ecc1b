//! Route guards.
//!
//! A guard turns a [`Session`] into a [`GuardDecision`]. The decision is a
//! pure function of `(is_loading, user, required role)`; acting on it
//! (rendering, redirecting) belongs to the inbound adapter.

use serde::Serialize;

use super::{Role, Session};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";
/// Path of the dashboard.
pub const HOME_PATH: &str = "/";

/// Access policy attached to a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    /// Any authenticated user.
    Protected,
    /// Authenticated `super_admin` only.
    Admin,
}

/// Why a guard sent the client elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// No user in the session.
    Unauthenticated,
    /// A user is present but lacks the required role. Handled silently.
    AuthorizationDenied,
}

/// Redirect target chosen by a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: &'static str,
    pub reason: RedirectReason,
}

/// Outcome of evaluating a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still resolving; show a placeholder.
    Wait,
    Redirect(Redirect),
    /// Render the requested content.
    Allow,
}

impl Guard {
    /// Role required on top of authentication, if any.
    #[must_use]
    pub const fn required_role(self) -> Option<Role> {
        match self {
            Self::Protected => None,
            Self::Admin => Some(Role::SuperAdmin),
        }
    }

    /// Decide what to do with a navigation under this guard.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{Guard, GuardDecision, Session};
    ///
    /// assert_eq!(Guard::Admin.evaluate(&Session::loading()), GuardDecision::Wait);
    /// ```
    #[must_use]
    pub fn evaluate(self, session: &Session) -> GuardDecision {
        if session.is_loading() {
            return GuardDecision::Wait;
        }
        let Some(user) = session.user() else {
            return GuardDecision::Redirect(Redirect {
                target: LOGIN_PATH,
                reason: RedirectReason::Unauthenticated,
            });
        };
        match self.required_role() {
            Some(role) if user.role() != role => GuardDecision::Redirect(Redirect {
                target: HOME_PATH,
                reason: RedirectReason::AuthorizationDenied,
            }),
            _ => GuardDecision::Allow,
        }
    }
}
