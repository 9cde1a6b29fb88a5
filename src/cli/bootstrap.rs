// Bootstrap command implementation
// Creates a level 1 account so the first administrator can log in

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::types::dto::users::UserPayload;
use crate::types::internal::{AccessScope, AuthLevel, RequestContext};

/// Result of `create_admin`
#[derive(Debug)]
pub struct CreatedAdmin {
    pub user_id: i32,
    pub username: String,
    /// Set only when no password was supplied
    pub generated_password: Option<String>,
}

/// Create an admin account named `username`.
///
/// A secure random password is generated when `password` is `None`.
///
/// # Returns
/// * `Ok(CreatedAdmin)` - Account created
/// * `Err(InternalError::Validation)` - Blank username or password, or the username is taken
pub async fn create_admin(
    app_data: &AppData,
    username: &str,
    password: Option<String>,
) -> Result<CreatedAdmin, InternalError> {
    let ctx = RequestContext::for_cli("create-admin");

    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::missing("username").into());
    }

    let (password, generated_password) = match password {
        Some(password) if password.is_empty() => {
            return Err(ValidationError::missing("password").into());
        }
        Some(password) => (password, None),
        None => {
            let generated = app_data.crypto_provider.generate_secure_password();
            (generated.clone(), Some(generated))
        }
    };

    let payload = UserPayload {
        username: username.to_string(),
        password: None,
        auth_level: AuthLevel::Admin,
        customer_id: None,
    };
    let password_hash = app_data.crypto_provider.hash_password(&password).await?;

    let created = app_data
        .user_store
        .create(&app_data.db, &AccessScope::Unrestricted, &payload, password_hash)
        .await?;

    tracing::info!(
        "Admin account {} ({}) created by {}",
        created.id,
        created.username,
        ctx.actor_id
    );

    Ok(CreatedAdmin {
        user_id: created.id,
        username: created.username,
        generated_password,
    })
}
