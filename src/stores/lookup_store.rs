use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::types::db::{asset_status, customer, device_type, request_status};
use crate::types::internal::AccessScope;

/// An id and the text shown for it in select boxes and tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOption {
    pub id: i32,
    pub label: String,
}

/// Seeded lookup tables and the customer name list
pub struct LookupStore;

impl LookupStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn device_types(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<LookupOption>, InternalError> {
        let rows = device_type::Entity::find()
            .order_by_asc(device_type::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_device_types", e))?;

        Ok(rows
            .into_iter()
            .map(|r| LookupOption { id: r.id, label: r.name })
            .collect())
    }

    pub async fn asset_statuses(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<LookupOption>, InternalError> {
        let rows = asset_status::Entity::find()
            .order_by_asc(asset_status::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_asset_statuses", e))?;

        Ok(rows
            .into_iter()
            .map(|r| LookupOption { id: r.id, label: r.value })
            .collect())
    }

    pub async fn request_statuses(
        &self,
        conn: &impl ConnectionTrait,
    ) -> Result<Vec<LookupOption>, InternalError> {
        let rows = request_status::Entity::find()
            .order_by_asc(request_status::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_request_statuses", e))?;

        Ok(rows
            .into_iter()
            .map(|r| LookupOption { id: r.id, label: r.value })
            .collect())
    }

    /// Customer names visible in `scope`: all for staff, their own for a
    /// customer user
    pub async fn customer_options(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
    ) -> Result<Vec<LookupOption>, InternalError> {
        let rows = customer::Entity::find()
            .filter(scope.condition(customer::Column::Id))
            .order_by_asc(customer::Column::CustomerName)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_customer_options", e))?;

        Ok(rows
            .into_iter()
            .map(|r| LookupOption {
                id: r.id,
                label: r.customer_name,
            })
            .collect())
    }

    pub async fn ensure_device_type(
        &self,
        conn: &impl ConnectionTrait,
        device_type_id: i32,
    ) -> Result<(), InternalError> {
        let found = device_type::Entity::find_by_id(device_type_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_device_type", e))?;
        found
            .map(|_| ())
            .ok_or_else(|| ValidationError::unknown("device_type_id", "device type").into())
    }

    pub async fn ensure_asset_status(
        &self,
        conn: &impl ConnectionTrait,
        status_id: i32,
    ) -> Result<(), InternalError> {
        let found = asset_status::Entity::find_by_id(status_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_asset_status", e))?;
        found
            .map(|_| ())
            .ok_or_else(|| ValidationError::unknown("status_id", "status").into())
    }

    /// The customer must exist and be inside `scope`
    pub async fn ensure_customer(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
    ) -> Result<(), InternalError> {
        let found = customer::Entity::find_by_id(customer_id)
            .filter(scope.condition(customer::Column::Id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_customer", e))?;
        found
            .map(|_| ())
            .ok_or_else(|| ValidationError::unknown("customer_id", "customer").into())
    }
}

impl Default for LookupStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Label for `id` in `options`, or an empty string
pub fn label_for(options: &[LookupOption], id: Option<i32>) -> &str {
    id.and_then(|id| options.iter().find(|o| o.id == id))
        .map(|o| o.label.as_str())
        .unwrap_or("")
}
