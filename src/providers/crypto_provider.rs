use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

use crate::errors::InternalError;
use crate::types::db::PasswordHash;

/// Password hashing and generation
///
/// Hashes are argon2id PHC strings. When a pepper is configured it is passed
/// to argon2 as the secret parameter, so hashes made with one pepper do not
/// verify under another.
pub struct CryptoProvider {
    password_pepper: Option<String>,
    /// Verified against when the username does not exist
    dummy_hash: PasswordHash,
}

fn argon2_for(pepper: Option<&str>) -> Result<Argon2<'_>, InternalError> {
    match pepper {
        Some(pepper) => Argon2::new_with_secret(
            pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string())),
        None => Ok(Argon2::default()),
    }
}

fn hash_with(pepper: Option<&str>, password: &str) -> Result<PasswordHash, InternalError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = argon2_for(pepper)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?;
    Ok(PasswordHash::from(hash.to_string()))
}

fn verify_with(pepper: Option<&str>, hash: &str, password: &str) -> Result<bool, InternalError> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| InternalError::crypto("parse_password_hash", e.to_string()))?;

    match argon2_for(pepper)?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(InternalError::crypto("verify_password", e.to_string())),
    }
}

impl CryptoProvider {
    pub fn new(password_pepper: Option<String>) -> Result<Self, InternalError> {
        let dummy_hash = hash_with(password_pepper.as_deref(), &generate_secure_password())?;
        Ok(Self {
            password_pepper,
            dummy_hash,
        })
    }

    /// Hash `password` on the blocking pool
    pub async fn hash_password(&self, password: &str) -> Result<PasswordHash, InternalError> {
        let pepper = self.password_pepper.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_with(pepper.as_deref(), &password))
            .await
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
    }

    /// Constant-time check of `password` against a stored hash
    ///
    /// # Returns
    /// * `Ok(false)` - Password does not match
    /// * `Err(InternalError::Crypto)` - Stored hash is unparseable
    pub async fn verify_password(
        &self,
        hash: &PasswordHash,
        password: &str,
    ) -> Result<bool, InternalError> {
        let pepper = self.password_pepper.clone();
        let hash = hash.as_str().to_owned();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_with(pepper.as_deref(), &hash, &password))
            .await
            .map_err(|e| InternalError::crypto("verify_password", e.to_string()))?
    }

    /// Spend the same work as a real verification for an unknown username
    pub async fn verify_dummy(&self, password: &str) {
        if let Err(e) = self.verify_password(&self.dummy_hash, password).await {
            tracing::warn!("Dummy password verification failed: {}", e);
        }
    }

    pub fn generate_secure_password(&self) -> String {
        generate_secure_password()
    }
}

impl std::fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoProvider")
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Generate a cryptographically secure random password
///
/// 20 characters drawn from upper and lower case letters, digits and symbols.
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
