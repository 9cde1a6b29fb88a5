use thiserror::Error;

/// Raised when an identity reaches a data operation its level does not allow.
///
/// The session gate normally stops these requests first; stores and
/// coordinators raise this as a second line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("No authenticated identity for {operation}")]
    Anonymous { operation: &'static str },

    #[error("{operation} requires staff access")]
    StaffOnly { operation: &'static str },

    #[error("{operation} requires admin access")]
    AdminOnly { operation: &'static str },
}
