//! Navigation chrome derived from the user's role.
//!
//! Everything here is a pure function of [`Role`] (and, for the active
//! item, the current path). The per-role table is an exhaustive `match`, so
//! adding a role forces a decision about its menu.

use serde::Serialize;

use super::Role;
use super::guard::{HOME_PATH, LOGIN_PATH};

/// One entry of the header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// Dashboard entry, shown to everyone.
pub const HOME_ITEM: NavItem = NavItem {
    label: "Beranda",
    path: HOME_PATH,
};
pub const CREATE_REPORT_ITEM: NavItem = NavItem {
    label: "Buat Laporan",
    path: "/create-report",
};
pub const USER_MANAGEMENT_ITEM: NavItem = NavItem {
    label: "Manajemen Akun",
    path: "/admin/users",
};
pub const LOCATION_MANAGEMENT_ITEM: NavItem = NavItem {
    label: "Manajemen Lokasi",
    path: "/admin/locations",
};

const BRANCH_USER_ITEMS: [NavItem; 1] = [CREATE_REPORT_ITEM];
const SUPER_ADMIN_ITEMS: [NavItem; 2] = [USER_MANAGEMENT_ITEM, LOCATION_MANAGEMENT_ITEM];

/// Items a role contributes after [`HOME_ITEM`].
const fn role_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::BranchUser => &BRANCH_USER_ITEMS,
        Role::SubdistrictAdmin | Role::CityAdmin => &[],
        Role::SuperAdmin => &SUPER_ADMIN_ITEMS,
    }
}

/// Ordered header items for `role`: home first, then role-specific entries.
///
/// # Examples
/// ```
/// use portal::domain::{Role, nav_items};
///
/// let labels: Vec<_> = nav_items(Role::BranchUser).iter().map(|i| i.label).collect();
/// assert_eq!(labels, ["Beranda", "Buat Laporan"]);
/// ```
#[must_use]
pub fn nav_items(role: Role) -> Vec<NavItem> {
    std::iter::once(HOME_ITEM)
        .chain(role_items(role).iter().copied())
        .collect()
}

/// Item whose path equals `current_path` exactly.
#[must_use]
pub fn active_item<'a>(items: &'a [NavItem], current_path: &str) -> Option<&'a NavItem> {
    items.iter().find(|item| item.path == current_path)
}

/// What an account-menu entry does when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MenuAction {
    Navigate { path: &'static str },
    /// End the session; the client then lands on [`LOGIN_PATH`].
    Logout { then: &'static str },
}

/// Entry of the account drop-down next to the user's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountMenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

const LOGOUT_ITEM: AccountMenuItem = AccountMenuItem {
    label: "Keluar",
    action: MenuAction::Logout { then: LOGIN_PATH },
};

/// Account drop-down entries for `role`. Super admins get shortcuts to the
/// administration pages; everyone gets logout last.
#[must_use]
pub fn account_menu(role: Role) -> Vec<AccountMenuItem> {
    let shortcuts: &[NavItem] = match role {
        Role::SuperAdmin => &SUPER_ADMIN_ITEMS,
        Role::BranchUser | Role::SubdistrictAdmin | Role::CityAdmin => &[],
    };
    shortcuts
        .iter()
        .map(|item| AccountMenuItem {
            label: item.label,
            action: MenuAction::Navigate { path: item.path },
        })
        .chain(std::iter::once(LOGOUT_ITEM))
        .collect()
}
