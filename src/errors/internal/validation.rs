use thiserror::Error;

/// Form submission problems. The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be a whole number")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} does not match any existing {kind}")]
    UnknownReference {
        field: &'static str,
        kind: &'static str,
    },

    #[error("Auth level must be 1, 2 or 3")]
    InvalidAuthLevel { value: String },

    #[error("Customer users must be linked to a customer")]
    CustomerRequired,

    #[error("Username is already in use: {username}")]
    DuplicateUsername { username: String },

    #[error("The selected device does not belong to this customer")]
    DeviceOutsideCustomer,

    #[error("You cannot delete your own account")]
    SelfDeletion,
}

impl ValidationError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn unknown(field: &'static str, kind: &'static str) -> Self {
        Self::UnknownReference { field, kind }
    }
}
