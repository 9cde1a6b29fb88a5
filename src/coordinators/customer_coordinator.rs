use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{AssetStore, CustomerStore, LookupOption, LookupStore, TicketStore};
use crate::types::db::{asset, customer, ticket};
use crate::types::dto::customers::{CustomerFilter, CustomerPayload};
use crate::types::internal::RequestContext;

/// Customer page: the record plus what hangs off it
#[derive(Debug)]
pub struct CustomerDetail {
    pub customer: customer::Model,
    pub assets: Vec<asset::Model>,
    /// New or In Progress
    pub open_tickets: Vec<ticket::Model>,
    pub device_types: Vec<LookupOption>,
    pub asset_statuses: Vec<LookupOption>,
    pub request_statuses: Vec<LookupOption>,
}

/// Customer coordinator for the staff-only `/customers` pages
pub struct CustomerCoordinator {
    db: DatabaseConnection,
    customer_store: Arc<CustomerStore>,
    asset_store: Arc<AssetStore>,
    ticket_store: Arc<TicketStore>,
    lookup_store: Arc<LookupStore>,
}

impl CustomerCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            customer_store: app_data.customer_store.clone(),
            asset_store: app_data.asset_store.clone(),
            ticket_store: app_data.ticket_store.clone(),
            lookup_store: app_data.lookup_store.clone(),
        }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: CustomerFilter,
    ) -> Result<Vec<customer::Model>, InternalError> {
        ctx.require_staff("list customers")?;
        self.customer_store.list(&self.db, &ctx.scope(), &filter).await
    }

    pub async fn detail(
        &self,
        ctx: &RequestContext,
        customer_id: i32,
    ) -> Result<CustomerDetail, InternalError> {
        ctx.require_staff("view customer")?;
        let scope = ctx.scope();

        let customer = self.customer_store.find(&self.db, &scope, customer_id).await?;
        let assets = self
            .asset_store
            .list_for_customer(&self.db, &scope, customer_id)
            .await?;
        let open_tickets = self
            .ticket_store
            .list_open_for_customer(&self.db, &scope, customer_id)
            .await?;

        Ok(CustomerDetail {
            customer,
            assets,
            open_tickets,
            device_types: self.lookup_store.device_types(&self.db).await?,
            asset_statuses: self.lookup_store.asset_statuses(&self.db).await?,
            request_statuses: self.lookup_store.request_statuses(&self.db).await?,
        })
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: CustomerPayload,
    ) -> Result<customer::Model, InternalError> {
        ctx.require_staff("create customer")?;
        self.customer_store.create(&self.db, &ctx.scope(), payload).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        customer_id: i32,
        payload: CustomerPayload,
    ) -> Result<customer::Model, InternalError> {
        ctx.require_staff("update customer")?;
        self.customer_store
            .update(&self.db, &ctx.scope(), customer_id, payload)
            .await
    }

    /// Deletes the customer together with its devices, users and tickets
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        customer_id: i32,
    ) -> Result<(), InternalError> {
        ctx.require_staff("delete customer")?;
        self.customer_store
            .delete(&self.db, &ctx.scope(), customer_id)
            .await
    }
}
