use thiserror::Error;

/// Reasons a login attempt failed.
///
/// The detailed variants are only logged. Browsers see a single
/// "Incorrect username/password" message for every variant.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Returned to callers for every failed attempt
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Password incorrect")]
    IncorrectPassword,
    #[error("Username not found: {username}")]
    UsernameNotFound { username: String },
    #[error("Stored user record is unusable: {reason}")]
    CorruptAccount { reason: String },
}

