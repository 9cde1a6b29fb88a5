use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::types::db::PasswordHash;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::dto::users::{UserFilter, UserPayload};
use crate::types::internal::{AccessScope, AuthLevel, RecordKind};

/// Users table. Every read except the login lookup requires an
/// unrestricted scope.
pub struct UserStore;

/// Columns the login flow needs
#[derive(Debug, Clone)]
pub struct UserForAuth {
    pub id: i32,
    pub username: String,
    pub password_hash: PasswordHash,
    pub auth_level: i32,
    pub customer_id: Option<i32>,
}

impl From<user::Model> for UserForAuth {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            password_hash: PasswordHash::from(u.password_hash),
            auth_level: u.auth_level,
            customer_id: u.customer_id,
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    /// Unscoped lookup used only to verify a login attempt
    pub async fn get_user_from_username_for_auth(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<UserForAuth>, InternalError> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("get_user_from_username_for_auth", e))?;

        Ok(user.map(UserForAuth::from))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        filter: &UserFilter,
    ) -> Result<Vec<user::Model>, InternalError> {
        scope.require_unrestricted("list users")?;

        let mut condition = Condition::all();
        if let Some(username) = &filter.username {
            condition = condition.add(user::Column::Username.contains(username));
        }
        if let Some(level) = filter.auth_level {
            condition = condition.add(user::Column::AuthLevel.eq(level.as_i32()));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(user::Column::CustomerId.eq(customer_id));
        }

        User::find()
            .filter(condition)
            .order_by_asc(user::Column::Username)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    /// Staff accounts, used to label assignees
    pub async fn list_staff(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
    ) -> Result<Vec<user::Model>, InternalError> {
        scope.require_unrestricted("list staff")?;

        User::find()
            .filter(user::Column::AuthLevel.is_in([
                AuthLevel::Admin.as_i32(),
                AuthLevel::Support.as_i32(),
            ]))
            .order_by_asc(user::Column::Username)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_staff", e))
    }

    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        user_id: i32,
    ) -> Result<user::Model, InternalError> {
        scope.require_unrestricted("view user")?;

        User::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user", e))?
            .ok_or(InternalError::not_found(RecordKind::User, user_id))
    }

    async fn ensure_username_free(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
        except_id: Option<i32>,
    ) -> Result<(), InternalError> {
        let mut condition = Condition::all().add(user::Column::Username.eq(username));
        if let Some(id) = except_id {
            condition = condition.add(user::Column::Id.ne(id));
        }

        let existing = User::find()
            .filter(condition)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("check_username", e))?;

        match existing {
            Some(_) => Err(ValidationError::DuplicateUsername {
                username: username.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Insert a user whose password has already been hashed
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        payload: &UserPayload,
        password_hash: PasswordHash,
    ) -> Result<user::Model, InternalError> {
        scope.require_unrestricted("create user")?;
        self.ensure_username_free(conn, &payload.username, None).await?;

        let now = Utc::now().timestamp();
        let new_user = ActiveModel {
            username: Set(payload.username.clone()),
            password_hash: Set(password_hash.into_inner()),
            auth_level: Set(payload.auth_level.as_i32()),
            customer_id: Set(payload.customer_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = new_user
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_user", e))?;

        tracing::info!(
            "Created user {} ({}) at level {}",
            created.id,
            created.username,
            created.auth_level
        );
        Ok(created)
    }

    /// Update profile fields; the hash is only replaced when given
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        user_id: i32,
        payload: &UserPayload,
        password_hash: Option<PasswordHash>,
    ) -> Result<user::Model, InternalError> {
        let existing = self.find(conn, scope, user_id).await?;
        self.ensure_username_free(conn, &payload.username, Some(user_id))
            .await?;

        let mut active: ActiveModel = existing.into();
        active.username = Set(payload.username.clone());
        active.auth_level = Set(payload.auth_level.as_i32());
        active.customer_id = Set(payload.customer_id);
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash.into_inner());
        }
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_user", e))
    }

    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        user_id: i32,
    ) -> Result<(), InternalError> {
        scope.require_unrestricted("delete user")?;

        let result = User::delete_by_id(user_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found(RecordKind::User, user_id));
        }
        tracing::info!("Deleted user {}", user_id);
        Ok(())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
