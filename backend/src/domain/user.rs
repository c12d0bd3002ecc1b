//! User identity as issued by the authentication backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "user name must not be empty"),
            Self::NameTooLong { max } => write!(f, "user name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum length of a user's display name, in characters.
pub const USER_NAME_MAX: usize = 64;

/// Access level of a user. Closed set; drives both route access and the
/// navigation chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Branch office staff; the only role that files new reports.
    BranchUser,
    SubdistrictAdmin,
    CityAdmin,
    /// Manages user accounts and locations.
    SuperAdmin,
}

impl Role {
    /// Every role, in ascending order of reach.
    pub const ALL: [Self; 4] = [
        Self::BranchUser,
        Self::SubdistrictAdmin,
        Self::CityAdmin,
        Self::SuperAdmin,
    ];

    /// Label shown next to the user's name in the account menu.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BranchUser => "User Cabang",
            Self::SubdistrictAdmin => "Admin Wilayah",
            Self::CityAdmin => "Admin Kota",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// Wire name, as stored by the authentication backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BranchUser => "branch_user",
            Self::SubdistrictAdmin => "subdistrict_admin",
            Self::CityAdmin => "city_admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user.
///
/// ## Invariants
/// - `id` is a valid UUID.
/// - `name` is non-blank and at most [`USER_NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use portal::domain::{Role, User};
///
/// let user = User::try_from_parts(
///     "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///     "Siti Rahma",
///     Role::BranchUser,
/// )
/// .unwrap();
/// assert_eq!(user.role(), Role::BranchUser);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: UserId,
    #[schema(example = "Siti Rahma")]
    name: String,
    role: Role,
}

impl User {
    /// Fallible constructor enforcing the invariants above.
    pub fn try_from_parts(
        id: impl AsRef<str>,
        name: impl Into<String>,
        role: Role,
    ) -> Result<Self, UserValidationError> {
        let id = UserId::new(id)?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                max: USER_NAME_MAX,
            });
        }
        Ok(Self { id, name, role })
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: String,
    name: String,
    role: Role,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name, role } = value;
        Self {
            id: id.into(),
            name,
            role,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.id, value.name, value.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    #[case("   ".to_owned(), UserValidationError::EmptyName)]
    #[case("x".repeat(USER_NAME_MAX + 1), UserValidationError::NameTooLong { max: USER_NAME_MAX })]
    fn user_rejects_bad_names(#[case] name: String, #[case] expected: UserValidationError) {
        let err = User::try_from_parts(VALID_ID, name, Role::CityAdmin).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(Role::BranchUser, "branch_user", "User Cabang")]
    #[case(Role::SubdistrictAdmin, "subdistrict_admin", "Admin Wilayah")]
    #[case(Role::CityAdmin, "city_admin", "Admin Kota")]
    #[case(Role::SuperAdmin, "super_admin", "Super Admin")]
    fn role_names_and_labels(#[case] role: Role, #[case] wire: &str, #[case] label: &str) {
        assert_eq!(role.as_str(), wire);
        assert_eq!(role.label(), label);
        assert_eq!(serde_json::to_value(role).expect("serialise"), json!(wire));
    }

    #[rstest]
    fn user_serialises_flat_payload() {
        let user = User::try_from_parts(VALID_ID, "Budi", Role::SuperAdmin).expect("valid user");
        let value = serde_json::to_value(&user).expect("serialise");
        assert_eq!(
            value,
            json!({ "id": VALID_ID, "name": "Budi", "role": "super_admin" })
        );
        let back: User = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, user);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let payload = json!({ "id": VALID_ID, "name": "Budi", "role": "root" });
        assert!(serde_json::from_value::<User>(payload).is_err());
    }
}
