//! JSON views rendered by the portal.
//!
//! Views are read-only projections of domain state. They hold no logic beyond
//! picking fields; every decision is taken in the domain layer.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    AccountMenuItem, GuardDecision, PageKind, Redirect, RedirectReason, Role, RouteMatch,
    RouteParams, Session, User, account_menu, active_item, nav_items,
};

/// Authenticated user as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    #[schema(example = "6f1c2b7e-8a43-4c1e-9a5e-0b6f6c1a0004")]
    pub id: String,
    #[schema(example = "Budi Santoso")]
    pub name: String,
    pub role: Role,
    /// Human-readable role, e.g. "Super Admin".
    #[schema(value_type = String, example = "Super Admin")]
    pub role_label: &'static str,
}

impl From<&User> for AccountView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            role: user.role(),
            role_label: user.role().label(),
        }
    }
}

/// Session snapshot returned by the session endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<AccountView>,
    pub is_loading: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user().map(AccountView::from),
            is_loading: session.is_loading(),
        }
    }
}

/// One header link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavLinkView {
    #[schema(value_type = String)]
    pub label: &'static str,
    #[schema(value_type = String)]
    pub path: &'static str,
    pub active: bool,
}

/// Header navigation for one role at one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavigationView {
    pub items: Vec<NavLinkView>,
}

impl NavigationView {
    /// Items for `role`, marking the one whose path equals `current_path`.
    pub fn for_role(role: Role, current_path: &str) -> Self {
        let items = nav_items(role);
        let active = active_item(&items, current_path).map(|item| item.path);
        Self {
            items: items
                .iter()
                .map(|item| NavLinkView {
                    label: item.label,
                    path: item.path,
                    active: Some(item.path) == active,
                })
                .collect(),
        }
    }
}

/// Account drop-down: who is signed in and what they can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMenuView {
    pub name: String,
    pub role_label: &'static str,
    pub items: Vec<AccountMenuItem>,
}

impl From<&User> for AccountMenuView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_owned(),
            role_label: user.role().label(),
            items: account_menu(user.role()),
        }
    }
}

/// The page the shell mounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub name: PageKind,
    pub title: &'static str,
    pub params: RouteParams,
}

/// Application frame around a page.
///
/// Navigation and the account menu are present only when a user is signed
/// in; login and not-found pages render without them for anonymous
/// visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub brand: String,
    pub page: PageView,
    pub navigation: Option<NavigationView>,
    pub account: Option<AccountMenuView>,
}

impl ShellView {
    /// Frame `route` for the session's user at `path`.
    pub fn compose(brand: &str, route: &RouteMatch, session: &Session, path: &str) -> Self {
        let user = session.user();
        Self {
            brand: brand.to_owned(),
            page: PageView {
                name: route.page,
                title: route.page.title(),
                params: route.params.clone(),
            },
            navigation: user.map(|user| NavigationView::for_role(user.role(), path)),
            account: user.map(AccountMenuView::from),
        }
    }
}

/// Body sent along with a guard redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedirectView {
    pub redirect: &'static str,
    pub reason: RedirectReason,
}

impl From<Redirect> for RedirectView {
    fn from(redirect: Redirect) -> Self {
        Self {
            redirect: redirect.target,
            reason: redirect.reason,
        }
    }
}

/// Body of the waiting placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct WaitView {
    #[schema(value_type = String, example = "loading")]
    pub state: &'static str,
    #[schema(value_type = String, example = "Memuat...")]
    pub message: &'static str,
}

impl WaitView {
    pub const LOADING: Self = Self {
        state: "loading",
        message: "Memuat...",
    };
}

/// Body returned by logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct LogoutView {
    #[schema(value_type = String, example = "/login")]
    pub redirect: &'static str,
}

/// Everything the shell renderer may answer with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Wait,
    Redirect(RedirectView),
    Render(ShellView),
}

impl ShellOutcome {
    /// Combine a guard decision with the framed page.
    pub fn decide(
        decision: GuardDecision,
        brand: &str,
        route: &RouteMatch,
        session: &Session,
        path: &str,
    ) -> Self {
        match decision {
            GuardDecision::Wait => Self::Wait,
            GuardDecision::Redirect(redirect) => Self::Redirect(redirect.into()),
            GuardDecision::Allow => Self::Render(ShellView::compose(brand, route, session, path)),
        }
    }
}
