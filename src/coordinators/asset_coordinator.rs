use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{AssetStore, LookupOption, LookupStore, TicketStore};
use crate::types::db::asset;
use crate::types::dto::assets::{AssetFilter, AssetPayload};
use crate::types::internal::{AccessScope, RequestContext};

/// Lookup lists used to label and edit devices
#[derive(Debug, Clone, Default)]
pub struct AssetLookups {
    pub customers: Vec<LookupOption>,
    pub device_types: Vec<LookupOption>,
    pub statuses: Vec<LookupOption>,
}

#[derive(Debug)]
pub struct AssetListing {
    pub assets: Vec<asset::Model>,
    pub lookups: AssetLookups,
}

#[derive(Debug)]
pub struct AssetDetail {
    pub asset: asset::Model,
    pub lookups: AssetLookups,
}

/// Asset coordinator for the `/assets` pages and asset creation
pub struct AssetCoordinator {
    db: DatabaseConnection,
    asset_store: Arc<AssetStore>,
    lookup_store: Arc<LookupStore>,
    ticket_store: Arc<TicketStore>,
}

impl AssetCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            asset_store: app_data.asset_store.clone(),
            lookup_store: app_data.lookup_store.clone(),
            ticket_store: app_data.ticket_store.clone(),
        }
    }

    async fn lookups(&self, scope: &AccessScope) -> Result<AssetLookups, InternalError> {
        Ok(AssetLookups {
            customers: self.lookup_store.customer_options(&self.db, scope).await?,
            device_types: self.lookup_store.device_types(&self.db).await?,
            statuses: self.lookup_store.asset_statuses(&self.db).await?,
        })
    }

    /// Choices for the `/create` forms
    pub async fn create_form(&self, ctx: &RequestContext) -> Result<AssetLookups, InternalError> {
        ctx.require_staff("open create page")?;
        self.lookups(&ctx.scope()).await
    }

    /// Devices visible to the caller; customer users only see their own
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: AssetFilter,
    ) -> Result<AssetListing, InternalError> {
        ctx.identity("list assets")?;
        let scope = ctx.scope();

        let assets = self.asset_store.list(&self.db, &scope, &filter).await?;
        Ok(AssetListing {
            assets,
            lookups: self.lookups(&scope).await?,
        })
    }

    pub async fn detail(
        &self,
        ctx: &RequestContext,
        asset_id: i32,
    ) -> Result<AssetDetail, InternalError> {
        ctx.require_staff("view asset")?;
        let scope = ctx.scope();

        let asset = self.asset_store.find(&self.db, &scope, asset_id).await?;
        Ok(AssetDetail {
            asset,
            lookups: self.lookups(&scope).await?,
        })
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: AssetPayload,
    ) -> Result<asset::Model, InternalError> {
        ctx.require_staff("create asset")?;
        let scope = ctx.scope();

        self.check_references(&self.db, &scope, &payload).await?;
        self.asset_store.create(&self.db, &scope, payload).await
    }

    /// Moving a device to another customer detaches it from the previous
    /// customer's tickets in the same transaction.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        asset_id: i32,
        payload: AssetPayload,
    ) -> Result<asset::Model, InternalError> {
        ctx.require_staff("update asset")?;
        let scope = ctx.scope();

        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let existing = self.asset_store.find(&txn, &scope, asset_id).await?;
        self.check_references(&txn, &scope, &payload).await?;
        let updated = self
            .asset_store
            .update(&txn, &scope, asset_id, payload)
            .await?;

        if existing.customer_id != updated.customer_id {
            self.ticket_store
                .detach_device_from_other_customers(&txn, &scope, asset_id, updated.customer_id)
                .await?;
        }

        txn.commit().await.map_err(InternalError::transaction_commit)?;
        Ok(updated)
    }

    pub async fn delete(&self, ctx: &RequestContext, asset_id: i32) -> Result<(), InternalError> {
        ctx.require_staff("delete asset")?;
        self.asset_store.delete(&self.db, &ctx.scope(), asset_id).await
    }

    async fn check_references(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        payload: &AssetPayload,
    ) -> Result<(), InternalError> {
        self.lookup_store
            .ensure_customer(conn, scope, payload.customer_id)
            .await?;
        self.lookup_store
            .ensure_device_type(conn, payload.device_type_id)
            .await?;
        self.lookup_store
            .ensure_asset_status(conn, payload.status_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::{ScopeError, ValidationError};
    use crate::test::utils::{
        ctx_for, insert_asset, insert_customer, insert_ticket, insert_user, setup_test_app_data,
    };
    use crate::stores::TicketUpdate;
    use crate::types::internal::{AuthLevel, RecordKind};

    fn payload(customer_id: i32) -> AssetPayload {
        AssetPayload {
            hostname: "fin-laptop-01".to_string(),
            customer_id,
            device_type_id: 1,
            status_id: 1,
            serial_number: Some("SN-42".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_detail_returns_same_fields() {
        let app_data = setup_test_app_data().await;
        let customer = insert_customer(&app_data.db, "Acme").await;
        let staff = ctx_for(&insert_user(&app_data.db, "sam", AuthLevel::Support, None).await);
        let coordinator = AssetCoordinator::new(app_data);

        let created = coordinator.create(&staff, payload(customer.id)).await.unwrap();
        let detail = coordinator.detail(&staff, created.id).await.unwrap();

        assert_eq!(detail.asset, created);
        assert_eq!(detail.asset.hostname, "fin-laptop-01");
        assert_eq!(detail.asset.serial_number.as_deref(), Some("SN-42"));
        assert!(!detail.lookups.device_types.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_device_type() {
        let app_data = setup_test_app_data().await;
        let customer = insert_customer(&app_data.db, "Acme").await;
        let staff = ctx_for(&insert_user(&app_data.db, "sam", AuthLevel::Admin, None).await);

        let mut bad = payload(customer.id);
        bad.device_type_id = 999;
        let err = AssetCoordinator::new(app_data)
            .create(&staff, bad)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InternalError::Validation(ValidationError::UnknownReference {
                field: "device_type_id",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_customer_user_lists_only_own_devices() {
        let app_data = setup_test_app_data().await;
        let own = insert_customer(&app_data.db, "Own").await;
        let other = insert_customer(&app_data.db, "Other").await;
        let mine = insert_asset(&app_data.db, own.id, "own-pc").await;
        insert_asset(&app_data.db, other.id, "other-pc").await;
        let customer_user =
            insert_user(&app_data.db, "cu", AuthLevel::Customer, Some(own.id)).await;
        let user = ctx_for(&customer_user);
        let coordinator = AssetCoordinator::new(app_data);

        let crafted = AssetFilter {
            customer_id: Some(other.id),
            ..AssetFilter::default()
        };
        assert!(coordinator.list(&user, crafted).await.unwrap().assets.is_empty());

        let listing = coordinator.list(&user, AssetFilter::default()).await.unwrap();
        assert_eq!(listing.assets, vec![mine]);
        assert_eq!(listing.lookups.customers.len(), 1);
    }

    #[tokio::test]
    async fn test_customer_user_cannot_open_asset_page() {
        let app_data = setup_test_app_data().await;
        let own = insert_customer(&app_data.db, "Own").await;
        let mine = insert_asset(&app_data.db, own.id, "own-pc").await;
        let customer_user =
            insert_user(&app_data.db, "cu", AuthLevel::Customer, Some(own.id)).await;
        let user = ctx_for(&customer_user);

        let err = AssetCoordinator::new(app_data)
            .detail(&user, mine.id)
            .await
            .unwrap_err();
        assert!(matches!(err, InternalError::Scope(ScopeError::StaffOnly { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_asset_is_not_found() {
        let app_data = setup_test_app_data().await;
        let staff = ctx_for(&insert_user(&app_data.db, "sam", AuthLevel::Support, None).await);

        let err = AssetCoordinator::new(app_data)
            .delete(&staff, 404)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InternalError::NotFound { kind: RecordKind::Asset, id: 404 }
        ));
    }

    #[tokio::test]
    async fn test_moving_device_detaches_it_from_previous_customers_tickets() {
        let app_data = setup_test_app_data().await;
        let acme = insert_customer(&app_data.db, "Acme").await;
        let globex = insert_customer(&app_data.db, "Globex").await;
        let laptop = insert_asset(&app_data.db, acme.id, "fin-laptop-01").await;
        let old_ticket = insert_ticket(&app_data.db, Some(acme.id), "Screen flicker").await;
        app_data
            .ticket_store
            .update(
                &app_data.db,
                &AccessScope::Unrestricted,
                old_ticket.id,
                TicketUpdate {
                    device_id: Some(Some(laptop.id)),
                    ..TicketUpdate::default()
                },
            )
            .await
            .unwrap();
        let staff = ctx_for(&insert_user(&app_data.db, "sam", AuthLevel::Support, None).await);
        let coordinator = AssetCoordinator::new(app_data.clone());

        let moved = coordinator
            .update(&staff, laptop.id, payload(globex.id))
            .await
            .unwrap();
        assert_eq!(moved.customer_id, globex.id);

        let ticket = app_data
            .ticket_store
            .find(&app_data.db, &AccessScope::Unrestricted, old_ticket.id)
            .await
            .unwrap();
        assert_eq!(ticket.device_id, None);
        assert_eq!(ticket.customer_id, Some(acme.id));
    }

    #[tokio::test]
    async fn test_update_without_customer_change_keeps_ticket_device() {
        let app_data = setup_test_app_data().await;
        let acme = insert_customer(&app_data.db, "Acme").await;
        let laptop = insert_asset(&app_data.db, acme.id, "fin-laptop-01").await;
        let ticket = insert_ticket(&app_data.db, Some(acme.id), "Screen flicker").await;
        app_data
            .ticket_store
            .update(
                &app_data.db,
                &AccessScope::Unrestricted,
                ticket.id,
                TicketUpdate {
                    device_id: Some(Some(laptop.id)),
                    ..TicketUpdate::default()
                },
            )
            .await
            .unwrap();
        let staff = ctx_for(&insert_user(&app_data.db, "sam", AuthLevel::Admin, None).await);

        AssetCoordinator::new(app_data.clone())
            .update(&staff, laptop.id, payload(acme.id))
            .await
            .unwrap();

        let ticket = app_data
            .ticket_store
            .find(&app_data.db, &AccessScope::Unrestricted, ticket.id)
            .await
            .unwrap();
        assert_eq!(ticket.device_id, Some(laptop.id));
    }
}
