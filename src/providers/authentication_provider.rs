use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::LoginError;
use crate::providers::crypto_provider::CryptoProvider;
use crate::stores::UserStore;
use crate::types::internal::{AuthLevel, SessionIdentity};

pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub enum LoginResponse {
    Success { identity: SessionIdentity },
    /// Unknown user or wrong password. Deliberately indistinguishable.
    InvalidCredentials,
}

pub struct AuthenticationProvider {
    store: Arc<UserStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl AuthenticationProvider {
    pub fn new(store: Arc<UserStore>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            store,
            crypto_provider,
        }
    }

    /// Check a username and password.
    ///
    /// The reason for a failure is logged at debug level and never returned.
    /// A stored row that cannot back a session (bad hash, bad level) is an
    /// error rather than a failed login.
    pub async fn verify_credential(
        &self,
        conn: &impl ConnectionTrait,
        creds: LoginRequest,
    ) -> Result<LoginResponse, InternalError> {
        let user = match self
            .store
            .get_user_from_username_for_auth(conn, &creds.username)
            .await?
        {
            Some(user) => user,
            None => {
                self.crypto_provider.verify_dummy(&creds.password).await;
                tracing::debug!(
                    "{}",
                    LoginError::UsernameNotFound {
                        username: creds.username
                    }
                );
                return Ok(LoginResponse::InvalidCredentials);
            }
        };

        let matches = self
            .crypto_provider
            .verify_password(&user.password_hash, &creds.password)
            .await
            .map_err(|e| LoginError::CorruptAccount {
                reason: e.to_string(),
            })?;

        if !matches {
            tracing::debug!("{} for user {}", LoginError::IncorrectPassword, user.id);
            return Ok(LoginResponse::InvalidCredentials);
        }

        let auth_level = AuthLevel::try_from(user.auth_level).map_err(|e| {
            LoginError::CorruptAccount {
                reason: e.to_string(),
            }
        })?;

        if auth_level == AuthLevel::Customer && user.customer_id.is_none() {
            tracing::warn!(
                "Customer user {} has no customer and will see no records",
                user.id
            );
        }

        tracing::info!("User {} logged in", user.id);
        Ok(LoginResponse::Success {
            identity: SessionIdentity {
                user_id: user.id,
                username: user.username,
                auth_level,
                customer_id: user.customer_id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::UserStore;
    use crate::test::utils::{insert_customer, setup_test_db};
    use crate::types::db::user;
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    async fn insert_login_user(
        db: &DatabaseConnection,
        crypto: &CryptoProvider,
        username: &str,
        password: &str,
        auth_level: i32,
        customer_id: Option<i32>,
    ) -> user::Model {
        let hash = crypto.hash_password(password).await.unwrap();
        let now = Utc::now().timestamp();
        user::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash.into_inner()),
            auth_level: Set(auth_level),
            customer_id: Set(customer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }

    fn provider(crypto: Arc<CryptoProvider>) -> AuthenticationProvider {
        AuthenticationProvider::new(Arc::new(UserStore::new()), crypto)
    }

    fn creds(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_correct_password_returns_identity() {
        let db = setup_test_db().await;
        let crypto = Arc::new(CryptoProvider::new(None).unwrap());
        let customer = insert_customer(&db, "Acme").await;
        let user = insert_login_user(&db, &crypto, "jane", "pw-123", 3, Some(customer.id)).await;

        let response = provider(crypto)
            .verify_credential(&db, creds("jane", "pw-123"))
            .await
            .unwrap();

        match response {
            LoginResponse::Success { identity } => {
                assert_eq!(identity.user_id, user.id);
                assert_eq!(identity.auth_level, AuthLevel::Customer);
                assert_eq!(identity.customer_id, Some(customer.id));
            }
            other => panic!("Expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let db = setup_test_db().await;
        let crypto = Arc::new(CryptoProvider::new(None).unwrap());
        insert_login_user(&db, &crypto, "jane", "pw-123", 2, None).await;
        let provider = provider(crypto);

        let wrong = provider
            .verify_credential(&db, creds("jane", "nope"))
            .await
            .unwrap();
        let unknown = provider
            .verify_credential(&db, creds("ghost", "pw-123"))
            .await
            .unwrap();

        assert!(matches!(wrong, LoginResponse::InvalidCredentials));
        assert!(matches!(unknown, LoginResponse::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_invalid_stored_level_is_corrupt_account() {
        let db = setup_test_db().await;
        let crypto = Arc::new(CryptoProvider::new(None).unwrap());
        insert_login_user(&db, &crypto, "odd", "pw", 9, None).await;

        let err = provider(crypto)
            .verify_credential(&db, creds("odd", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InternalError::Login(LoginError::CorruptAccount { .. })
        ));
    }
}
