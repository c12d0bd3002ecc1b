//! Seed accounts backing the fixture adapters, one per role.

use crate::domain::{Role, User, UserValidationError};

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// A fixture account: login name plus the user it authenticates as.
#[derive(Debug, Clone, Copy)]
pub struct FixtureAccount {
    pub username: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub role: Role,
}

impl FixtureAccount {
    /// Build the domain user for this account.
    pub fn user(&self) -> Result<User, UserValidationError> {
        User::try_from_parts(self.id, self.name, self.role)
    }
}

const ACCOUNTS: [FixtureAccount; 4] = [
    FixtureAccount {
        username: "cabang",
        id: "6f1c2b7e-8a43-4c1e-9a5e-0b6f6c1a0001",
        name: "Siti Rahma",
        role: Role::BranchUser,
    },
    FixtureAccount {
        username: "wilayah",
        id: "6f1c2b7e-8a43-4c1e-9a5e-0b6f6c1a0002",
        name: "Agus Setiawan",
        role: Role::SubdistrictAdmin,
    },
    FixtureAccount {
        username: "kota",
        id: "6f1c2b7e-8a43-4c1e-9a5e-0b6f6c1a0003",
        name: "Dewi Lestari",
        role: Role::CityAdmin,
    },
    FixtureAccount {
        username: "admin",
        id: "6f1c2b7e-8a43-4c1e-9a5e-0b6f6c1a0004",
        name: "Budi Santoso",
        role: Role::SuperAdmin,
    },
];

/// All fixture accounts.
#[must_use]
pub fn fixture_accounts() -> &'static [FixtureAccount] {
    &ACCOUNTS
}
