//! Domain ports for the hexagonal boundary.
//!
//! Both ports are driven by the session store; the HTTP adapter only ever
//! talks to them through [`crate::domain::SessionStore`].

mod fixture_accounts;
mod login_service;
mod user_directory;

pub use fixture_accounts::{FIXTURE_PASSWORD, FixtureAccount, fixture_accounts};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory};
