use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::LoginError;
use crate::providers::{AuthenticationProvider, LoginRequest, LoginResponse};
use crate::types::internal::{RequestContext, SessionIdentity};

/// Login coordinator that turns submitted credentials into a session identity
pub struct LoginCoordinator {
    db: DatabaseConnection,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl LoginCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            app_data.user_store.clone(),
            app_data.crypto_provider.clone(),
        ));

        Self {
            db: app_data.db.clone(),
            authentication_provider,
        }
    }

    /// Verify `username` and `password`.
    ///
    /// # Returns
    /// * `Ok(SessionIdentity)` - Identity to store in the session
    /// * `Err(InternalError::Login(LoginError::InvalidCredentials))` - Unknown user or wrong
    ///   password
    /// * `Err(InternalError)` - Unusable stored account or database error
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: String,
        password: String,
    ) -> Result<SessionIdentity, InternalError> {
        let response = self
            .authentication_provider
            .verify_credential(&self.db, LoginRequest { username, password })
            .await?;

        match response {
            LoginResponse::Success { identity } => Ok(identity),
            LoginResponse::InvalidCredentials => {
                tracing::info!(
                    "Failed login attempt (request {}, ip {:?})",
                    ctx.request_id,
                    ctx.ip_address
                );
                Err(LoginError::InvalidCredentials.into())
            }
        }
    }
}
