//! Domain primitives, policies and ports.
//!
//! Purpose: hold everything the portal decides, independent of HTTP. The
//! inbound adapter builds a [`SessionStore`] per request, asks the route
//! table which page and guard apply, and renders the [`GuardDecision`].
//!
//! Public surface:
//! - [`User`], [`Role`], [`UserId`]: identity issued by the auth backend.
//! - [`Session`], [`SessionStore`]: per-session authentication state.
//! - [`Guard`], [`GuardDecision`]: access policy per route.
//! - [`nav_items`], [`account_menu`]: role-derived chrome.
//! - [`match_route`]: the fixed route table.
//! - [`Error`], [`ErrorCode`], [`AuthError`]: failure taxonomy.

pub mod auth;
pub mod error;
pub mod guard;
pub mod navigation;
pub mod ports;
pub mod routes;
pub mod session;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthError, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::guard::{Guard, GuardDecision, HOME_PATH, LOGIN_PATH, Redirect, RedirectReason};
pub use self::navigation::{
    AccountMenuItem, MenuAction, NavItem, account_menu, active_item, nav_items,
};
pub use self::routes::{PageKind, ROUTES, RouteEntry, RouteMatch, RouteParams, match_route};
pub use self::session::{Session, SessionStore};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Role, USER_NAME_MAX, User, UserId, UserValidationError};
