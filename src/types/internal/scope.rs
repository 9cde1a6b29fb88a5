use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition};

use crate::errors::internal::ScopeError;

use super::{AuthLevel, SessionIdentity};

/// The subset of customer-owned rows a session may touch.
///
/// Derived from the session identity in exactly one place
/// (`AccessScope::for_identity`) and applied by every store that reads or
/// writes customer-owned rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// Staff: every row
    Unrestricted,
    /// Customer user: rows owned by this customer only
    Customer(i32),
    /// Customer user without a customer. Sees nothing.
    Nothing,
}

impl AccessScope {
    pub fn for_identity(identity: &SessionIdentity) -> Self {
        match identity.auth_level {
            AuthLevel::Admin | AuthLevel::Support => AccessScope::Unrestricted,
            AuthLevel::Customer => identity
                .customer_id
                .map(AccessScope::Customer)
                .unwrap_or(AccessScope::Nothing),
        }
    }

    /// Condition restricting `customer_col` to this scope.
    ///
    /// Callers AND it with their own filters, so a caller-supplied
    /// customer filter can only narrow the result.
    pub fn condition<C: ColumnTrait>(&self, customer_col: C) -> Condition {
        match self {
            AccessScope::Unrestricted => Condition::all(),
            AccessScope::Customer(customer_id) => {
                Condition::all().add(customer_col.eq(*customer_id))
            }
            AccessScope::Nothing => Condition::all().add(Expr::value(false)),
        }
    }

    /// Whether a row owned by `customer_id` is visible
    pub fn permits(&self, customer_id: Option<i32>) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::Customer(own) => customer_id == Some(*own),
            AccessScope::Nothing => false,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, AccessScope::Unrestricted)
    }

    /// Reject non-staff scopes for operations on staff-only tables
    pub fn require_unrestricted(&self, operation: &'static str) -> Result<(), ScopeError> {
        if self.is_unrestricted() {
            Ok(())
        } else {
            Err(ScopeError::StaffOnly { operation })
        }
    }

    /// The customer a restricted scope is pinned to
    pub fn customer_id(&self) -> Option<i32> {
        match self {
            AccessScope::Customer(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(level: AuthLevel, customer_id: Option<i32>) -> SessionIdentity {
        SessionIdentity {
            user_id: 1,
            username: "someone".to_string(),
            auth_level: level,
            customer_id,
        }
    }

    #[test]
    fn test_staff_levels_are_unrestricted_even_with_customer() {
        assert_eq!(
            AccessScope::for_identity(&identity(AuthLevel::Admin, None)),
            AccessScope::Unrestricted
        );
        assert_eq!(
            AccessScope::for_identity(&identity(AuthLevel::Support, Some(4))),
            AccessScope::Unrestricted
        );
    }

    #[test]
    fn test_customer_level_is_pinned_to_its_customer() {
        assert_eq!(
            AccessScope::for_identity(&identity(AuthLevel::Customer, Some(5))),
            AccessScope::Customer(5)
        );
    }

    #[test]
    fn test_customer_level_without_customer_sees_nothing() {
        let scope = AccessScope::for_identity(&identity(AuthLevel::Customer, None));
        assert_eq!(scope, AccessScope::Nothing);
        assert!(!scope.permits(None));
        assert!(!scope.permits(Some(1)));
    }

    #[test]
    fn test_permits() {
        assert!(AccessScope::Unrestricted.permits(None));
        assert!(AccessScope::Unrestricted.permits(Some(9)));
        assert!(AccessScope::Customer(5).permits(Some(5)));
        assert!(!AccessScope::Customer(5).permits(Some(9)));
        assert!(!AccessScope::Customer(5).permits(None));
    }

    #[test]
    fn test_require_unrestricted() {
        assert!(AccessScope::Unrestricted.require_unrestricted("list users").is_ok());
        assert_eq!(
            AccessScope::Customer(5).require_unrestricted("list users"),
            Err(ScopeError::StaffOnly {
                operation: "list users"
            })
        );
    }
}
