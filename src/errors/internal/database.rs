use std::fmt;

use sea_orm::DbErr;
use thiserror::Error;

/// Failures reported by the database driver
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// `operation` names the store call, e.g. `create_ticket`
    #[error("Database error: {operation} failed: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("{phase} transaction failed: {source}")]
    Transaction {
        phase: TransactionPhase,
        #[source]
        source: DbErr,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionPhase {
    Begin,
    Commit,
}

impl fmt::Display for TransactionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionPhase::Begin => "Starting",
            TransactionPhase::Commit => "Committing",
        })
    }
}
