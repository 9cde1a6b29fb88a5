use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;

/// Access tier stored in `users.auth_level`.
///
/// Admin and Support see every row; only Admin manages users.
/// Customer users are confined to their own customer's assets and tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AuthLevel {
    Admin = 1,
    Support = 2,
    Customer = 3,
}

impl AuthLevel {
    /// Levels allowed on staff pages
    pub const STAFF: &'static [AuthLevel] = &[AuthLevel::Admin, AuthLevel::Support];

    /// Levels allowed on user management pages
    pub const ADMIN: &'static [AuthLevel] = &[AuthLevel::Admin];

    /// Every authenticated level
    pub const ANY: &'static [AuthLevel] =
        &[AuthLevel::Admin, AuthLevel::Support, AuthLevel::Customer];

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_staff(self) -> bool {
        matches!(self, AuthLevel::Admin | AuthLevel::Support)
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthLevel::Admin => "Administrator",
            AuthLevel::Support => "Support",
            AuthLevel::Customer => "Customer",
        }
    }

    /// Parse a form value such as `"2"`
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::missing("auth_level"));
        }
        trimmed
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidAuthLevel {
                value: trimmed.to_owned(),
            })
            .and_then(AuthLevel::try_from)
    }
}

impl TryFrom<i32> for AuthLevel {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AuthLevel::Admin),
            2 => Ok(AuthLevel::Support),
            3 => Ok(AuthLevel::Customer),
            other => Err(ValidationError::InvalidAuthLevel {
                value: other.to_string(),
            }),
        }
    }
}

impl From<AuthLevel> for i32 {
    fn from(level: AuthLevel) -> Self {
        level.as_i32()
    }
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_i32())
    }
}
