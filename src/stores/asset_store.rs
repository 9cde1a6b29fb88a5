use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::asset::{self, ActiveModel, Entity as Asset};
use crate::types::dto::assets::{AssetFilter, AssetPayload};
use crate::types::internal::{AccessScope, RecordKind};

/// Devices, always read through the caller's `AccessScope`
pub struct AssetStore;

impl AssetStore {
    pub fn new() -> Self {
        Self
    }

    /// Devices matching `filter` within `scope`, ordered by hostname
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        filter: &AssetFilter,
    ) -> Result<Vec<asset::Model>, InternalError> {
        let mut condition = scope.condition(asset::Column::CustomerId);

        if let Some(hostname) = &filter.hostname {
            condition = condition.add(asset::Column::Hostname.contains(hostname));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(asset::Column::CustomerId.eq(customer_id));
        }
        if let Some(device_type_id) = filter.device_type_id {
            condition = condition.add(asset::Column::DeviceTypeId.eq(device_type_id));
        }
        if let Some(status_id) = filter.status_id {
            condition = condition.add(asset::Column::StatusId.eq(status_id));
        }
        if let Some(serial_number) = &filter.serial_number {
            condition = condition.add(asset::Column::SerialNumber.contains(serial_number));
        }

        Asset::find()
            .filter(condition)
            .order_by_asc(asset::Column::Hostname)
            .order_by_asc(asset::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_assets", e))
    }

    /// Devices owned by `customer_id`, empty when that customer is out of scope
    pub async fn list_for_customer(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
    ) -> Result<Vec<asset::Model>, InternalError> {
        let filter = AssetFilter {
            customer_id: Some(customer_id),
            ..AssetFilter::default()
        };
        self.list(conn, scope, &filter).await
    }

    /// One device. Missing and out-of-scope ids are both `NotFound`.
    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        asset_id: i32,
    ) -> Result<asset::Model, InternalError> {
        Asset::find_by_id(asset_id)
            .filter(scope.condition(asset::Column::CustomerId))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_asset", e))?
            .ok_or(InternalError::not_found(RecordKind::Asset, asset_id))
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        payload: AssetPayload,
    ) -> Result<asset::Model, InternalError> {
        scope.require_unrestricted("create asset")?;

        let new_asset = ActiveModel {
            hostname: Set(payload.hostname),
            customer_id: Set(payload.customer_id),
            device_type_id: Set(payload.device_type_id),
            status_id: Set(payload.status_id),
            serial_number: Set(payload.serial_number),
            description: Set(payload.description),
            ..Default::default()
        };

        let created = new_asset
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_asset", e))?;

        tracing::debug!("Created asset {} ({})", created.id, created.hostname);
        Ok(created)
    }

    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        asset_id: i32,
        payload: AssetPayload,
    ) -> Result<asset::Model, InternalError> {
        scope.require_unrestricted("update asset")?;
        let existing = self.find(conn, scope, asset_id).await?;

        let mut active: ActiveModel = existing.into();
        active.hostname = Set(payload.hostname);
        active.customer_id = Set(payload.customer_id);
        active.device_type_id = Set(payload.device_type_id);
        active.status_id = Set(payload.status_id);
        active.serial_number = Set(payload.serial_number);
        active.description = Set(payload.description);

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_asset", e))
    }

    /// Delete a device. Tickets referencing it keep their other fields.
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        asset_id: i32,
    ) -> Result<(), InternalError> {
        scope.require_unrestricted("delete asset")?;
        let result = Asset::delete_by_id(asset_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_asset", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found(RecordKind::Asset, asset_id));
        }
        tracing::debug!("Deleted asset {}", asset_id);
        Ok(())
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::ScopeError;
    use crate::test::utils::{insert_asset, insert_customer, setup_test_db};

    fn payload(customer_id: i32) -> AssetPayload {
        AssetPayload {
            hostname: "ws-0042".to_string(),
            customer_id,
            device_type_id: 1,
            status_id: 1,
            serial_number: Some("SN-42".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_find_returns_same_fields() {
        let db = setup_test_db().await;
        let customer = insert_customer(&db, "Acme").await;
        let store = AssetStore::new();

        let created = store
            .create(&db, &AccessScope::Unrestricted, payload(customer.id))
            .await
            .unwrap();
        let found = store
            .find(&db, &AccessScope::Unrestricted, created.id)
            .await
            .unwrap();

        assert_eq!(created, found);
        assert_eq!(found.hostname, "ws-0042");
        assert_eq!(found.serial_number.as_deref(), Some("SN-42"));
    }

    #[tokio::test]
    async fn test_customer_scope_hides_other_customers_assets() {
        let db = setup_test_db().await;
        let own = insert_customer(&db, "Own").await;
        let other = insert_customer(&db, "Other").await;
        let own_asset = insert_asset(&db, own.id, "own-01").await;
        let other_asset = insert_asset(&db, other.id, "other-01").await;
        let store = AssetStore::new();
        let scope = AccessScope::Customer(own.id);

        let listed = store.list(&db, &scope, &AssetFilter::default()).await.unwrap();
        assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![own_asset.id]);

        let err = store.find(&db, &scope, other_asset.id).await.unwrap_err();
        assert!(matches!(err, InternalError::NotFound { kind: RecordKind::Asset, .. }));
    }

    #[tokio::test]
    async fn test_customer_filter_cannot_widen_scope() {
        let db = setup_test_db().await;
        let own = insert_customer(&db, "Own").await;
        let other = insert_customer(&db, "Other").await;
        insert_asset(&db, other.id, "other-01").await;
        let store = AssetStore::new();

        let filter = AssetFilter {
            customer_id: Some(other.id),
            ..AssetFilter::default()
        };
        let listed = store
            .list(&db, &AccessScope::Customer(own.id), &filter)
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_scope_sees_nothing() {
        let db = setup_test_db().await;
        let customer = insert_customer(&db, "Acme").await;
        insert_asset(&db, customer.id, "ws-01").await;

        let listed = AssetStore::new()
            .list(&db, &AccessScope::Nothing, &AssetFilter::default())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_search_filters_combine() {
        let db = setup_test_db().await;
        let customer = insert_customer(&db, "Acme").await;
        insert_asset(&db, customer.id, "web-01").await;
        insert_asset(&db, customer.id, "db-01").await;

        let filter = AssetFilter {
            hostname: Some("web".to_string()),
            ..AssetFilter::default()
        };
        let listed = AssetStore::new()
            .list(&db, &AccessScope::Unrestricted, &filter)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].hostname, "web-01");
    }

    #[tokio::test]
    async fn test_writes_require_unrestricted_scope() {
        let db = setup_test_db().await;
        let customer = insert_customer(&db, "Acme").await;
        let store = AssetStore::new();

        let err = store
            .create(&db, &AccessScope::Customer(customer.id), payload(customer.id))
            .await
            .unwrap_err();
        assert!(matches!(err, InternalError::Scope(ScopeError::StaffOnly { .. })));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = setup_test_db().await;
        let customer = insert_customer(&db, "Acme").await;
        let asset = insert_asset(&db, customer.id, "ws-01").await;
        let store = AssetStore::new();
        let scope = AccessScope::Unrestricted;

        let mut changed = payload(customer.id);
        changed.hostname = "ws-01-renamed".to_string();
        let updated = store.update(&db, &scope, asset.id, changed).await.unwrap();
        assert_eq!(updated.hostname, "ws-01-renamed");

        store.delete(&db, &scope, asset.id).await.unwrap();
        assert!(store.find(&db, &scope, asset.id).await.is_err());
        assert!(matches!(
            store.delete(&db, &scope, asset.id).await,
            Err(InternalError::NotFound { .. })
        ));
    }
}
