use thiserror::Error;

pub mod database;
pub mod login;
pub mod scope;
pub mod ticket;
pub mod validation;

pub use database::{DatabaseError, TransactionPhase};
pub use login::LoginError;
pub use scope::ScopeError;
pub use ticket::TicketError;
pub use validation::ValidationError;

use crate::types::internal::RecordKind;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (Database, Crypto) are shared by every layer;
/// domain errors carry the policy decisions the web layer turns into redirects.
/// Not rendered directly: the web layer converts it through `WebError::from_internal`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    /// Missing or out-of-scope row. Both cases look the same to the caller.
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: i32 },

    #[error(transparent)]
    Login(#[from] LoginError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error(transparent)]
    Ticket(#[from] TicketError),
}

impl InternalError {
    pub fn database(operation: &'static str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Query { operation, source })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Transaction {
            phase: TransactionPhase::Begin,
            source,
        })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Transaction {
            phase: TransactionPhase::Commit,
            source,
        })
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: RecordKind, id: i32) -> Self {
        Self::NotFound { kind, id }
    }
}
