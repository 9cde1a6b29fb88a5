use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::providers::CryptoProvider;
use crate::stores::{LookupOption, LookupStore, UserStore};
use crate::types::db::user;
use crate::types::dto::users::{UserFilter, UserPayload};
use crate::types::internal::{AccessScope, RequestContext};

#[derive(Debug)]
pub struct UserListing {
    pub users: Vec<user::Model>,
    pub customers: Vec<LookupOption>,
}

#[derive(Debug)]
pub struct UserDetail {
    pub user: user::Model,
    pub customers: Vec<LookupOption>,
}

/// User management coordinator. Every operation requires an admin session.
pub struct UserCoordinator {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    lookup_store: Arc<LookupStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            user_store: app_data.user_store.clone(),
            lookup_store: app_data.lookup_store.clone(),
            crypto_provider: app_data.crypto_provider.clone(),
        }
    }

    /// Customers to pick from on the user forms
    pub async fn customers(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<LookupOption>, InternalError> {
        ctx.require_admin("list customers for user form")?;
        self.lookup_store.customer_options(&self.db, &ctx.scope()).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: UserFilter,
    ) -> Result<UserListing, InternalError> {
        ctx.require_admin("list users")?;
        let scope = ctx.scope();

        Ok(UserListing {
            users: self.user_store.list(&self.db, &scope, &filter).await?,
            customers: self.lookup_store.customer_options(&self.db, &scope).await?,
        })
    }

    pub async fn detail(
        &self,
        ctx: &RequestContext,
        user_id: i32,
    ) -> Result<UserDetail, InternalError> {
        ctx.require_admin("view user")?;
        let scope = ctx.scope();

        Ok(UserDetail {
            user: self.user_store.find(&self.db, &scope, user_id).await?,
            customers: self.lookup_store.customer_options(&self.db, &scope).await?,
        })
    }

    /// Create a user. The password is hashed before it reaches the store.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: UserPayload,
    ) -> Result<user::Model, InternalError> {
        ctx.require_admin("create user")?;
        let scope = ctx.scope();

        self.check_customer(&scope, &payload).await?;
        let password = payload
            .password
            .as_deref()
            .ok_or(ValidationError::missing("password"))?;
        let password_hash = self.crypto_provider.hash_password(password).await?;

        self.user_store
            .create(&self.db, &scope, &payload, password_hash)
            .await
    }

    /// Update a user. A blank password keeps the stored hash.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        user_id: i32,
        payload: UserPayload,
    ) -> Result<user::Model, InternalError> {
        ctx.require_admin("update user")?;
        let scope = ctx.scope();

        self.check_customer(&scope, &payload).await?;
        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(self.crypto_provider.hash_password(password).await?),
            None => None,
        };

        self.user_store
            .update(&self.db, &scope, user_id, &payload, password_hash)
            .await
    }

    pub async fn delete(&self, ctx: &RequestContext, user_id: i32) -> Result<(), InternalError> {
        let admin = ctx.require_admin("delete user")?;
        if admin.user_id == user_id {
            return Err(ValidationError::SelfDeletion.into());
        }
        self.user_store.delete(&self.db, &ctx.scope(), user_id).await
    }

    async fn check_customer(
        &self,
        scope: &AccessScope,
        payload: &UserPayload,
    ) -> Result<(), InternalError> {
        match payload.customer_id {
            Some(customer_id) => {
                self.lookup_store
                    .ensure_customer(&self.db, scope, customer_id)
                    .await
            }
            None => Ok(()),
        }
    }
}
