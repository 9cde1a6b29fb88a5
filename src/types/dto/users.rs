use serde::Deserialize;

use crate::errors::internal::ValidationError;
use crate::types::internal::AuthLevel;

use super::fields::{optional_id, optional_text, required_text};

/// Form used on `/users/create` and `/users/:id`.
///
/// On update a blank password keeps the stored hash.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub auth_level: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload {
    pub username: String,
    pub password: Option<String>,
    pub auth_level: AuthLevel,
    /// Always Some for customer users, always None for staff
    pub customer_id: Option<i32>,
}

impl UserForm {
    pub fn validate_new(&self) -> Result<UserPayload, ValidationError> {
        let payload = self.validate_update()?;
        if payload.password.is_none() {
            return Err(ValidationError::missing("password"));
        }
        Ok(payload)
    }

    pub fn validate_update(&self) -> Result<UserPayload, ValidationError> {
        let username = required_text("username", &self.username)?;
        let auth_level = AuthLevel::parse(&self.auth_level)?;
        let customer_id = optional_id("customer_id", &self.customer_id)?;

        let customer_id = match auth_level {
            AuthLevel::Customer => Some(customer_id.ok_or(ValidationError::CustomerRequired)?),
            AuthLevel::Admin | AuthLevel::Support => None,
        };

        Ok(UserPayload {
            username,
            // Passwords are not trimmed
            password: (!self.password.is_empty()).then(|| self.password.clone()),
            auth_level,
            customer_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserSearchForm {
    pub username: String,
    pub auth_level: String,
    pub customer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Substring match
    pub username: Option<String>,
    pub auth_level: Option<AuthLevel>,
    pub customer_id: Option<i32>,
}

impl UserSearchForm {
    pub fn validate(&self) -> Result<UserFilter, ValidationError> {
        let auth_level = if self.auth_level.trim().is_empty() {
            None
        } else {
            Some(AuthLevel::parse(&self.auth_level)?)
        };
        Ok(UserFilter {
            username: optional_text(&self.username),
            auth_level,
            customer_id: optional_id("customer_id", &self.customer_id)?,
        })
    }
}
