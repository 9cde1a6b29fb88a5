use serde::{Deserialize, Serialize};

use super::{AccessScope, AuthLevel};

/// Identity stored in the server-side session after a successful login.
///
/// A session without one is logged out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i32,
    pub username: String,
    pub auth_level: AuthLevel,
    pub customer_id: Option<i32>,
}

impl SessionIdentity {
    /// Whether this identity is one of the `allowed` levels
    pub fn has_level(&self, allowed: &[AuthLevel]) -> bool {
        allowed.contains(&self.auth_level)
    }

    pub fn is_staff(&self) -> bool {
        self.auth_level.is_staff()
    }

    /// Rows this identity may read and write
    pub fn scope(&self) -> AccessScope {
        AccessScope::for_identity(self)
    }
}
