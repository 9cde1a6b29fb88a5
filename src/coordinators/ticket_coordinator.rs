use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::TicketProvider;
use crate::stores::{AssetStore, LookupOption, LookupStore, NoteStore, TicketStore, UserStore};
use crate::types::db::{asset, note, ticket, user};
use crate::types::dto::assets::AssetFilter;
use crate::types::dto::tickets::{TicketChange, TicketFilter, TicketPayload};
use crate::types::dto::users::UserFilter;
use crate::types::internal::{AccessScope, RequestContext};

/// Names for the ids a ticket row carries
#[derive(Debug, Clone, Default)]
pub struct TicketLabels {
    pub customers: Vec<LookupOption>,
    pub devices: Vec<LookupOption>,
    /// Empty for customer users, who cannot read the user table
    pub users: Vec<LookupOption>,
    pub statuses: Vec<LookupOption>,
}

#[derive(Debug)]
pub struct TicketListing {
    pub tickets: Vec<ticket::Model>,
    pub labels: TicketLabels,
}

/// Everything the `/contact` page shows
#[derive(Debug)]
pub struct ContactPage {
    /// Devices the caller may raise a ticket against
    pub devices: Vec<asset::Model>,
    /// Staff only; empty for customer users
    pub tickets: Vec<ticket::Model>,
    pub labels: TicketLabels,
}

#[derive(Debug)]
pub struct TicketDetail {
    pub ticket: ticket::Model,
    /// Oldest first
    pub notes: Vec<note::Model>,
    /// Device choices: the ticket customer's devices, or all of them
    pub devices: Vec<asset::Model>,
    /// Requester choices: the ticket customer's users, or all of them
    pub users: Vec<user::Model>,
    pub labels: TicketLabels,
}

/// Escalation raised from the application error page
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub failed_path: String,
    pub description: String,
}

/// Ticket coordinator for `/home`, `/contact`, `/user-requests`, `/tickets`
/// and `/error`
pub struct TicketCoordinator {
    db: DatabaseConnection,
    ticket_provider: Arc<TicketProvider>,
    ticket_store: Arc<TicketStore>,
    note_store: Arc<NoteStore>,
    asset_store: Arc<AssetStore>,
    user_store: Arc<UserStore>,
    lookup_store: Arc<LookupStore>,
}

impl TicketCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let ticket_provider = Arc::new(TicketProvider::new(
            app_data.ticket_store.clone(),
            app_data.note_store.clone(),
            app_data.asset_store.clone(),
            app_data.user_store.clone(),
            app_data.lookup_store.clone(),
        ));

        Self {
            db: app_data.db.clone(),
            ticket_provider,
            ticket_store: app_data.ticket_store.clone(),
            note_store: app_data.note_store.clone(),
            asset_store: app_data.asset_store.clone(),
            user_store: app_data.user_store.clone(),
            lookup_store: app_data.lookup_store.clone(),
        }
    }

    async fn labels(&self, scope: &AccessScope) -> Result<TicketLabels, InternalError> {
        let devices = self
            .asset_store
            .list(&self.db, scope, &AssetFilter::default())
            .await?
            .into_iter()
            .map(|a| LookupOption {
                id: a.id,
                label: a.hostname,
            })
            .collect();

        let users = if scope.is_unrestricted() {
            self.user_store
                .list(&self.db, scope, &UserFilter::default())
                .await?
                .into_iter()
                .map(|u| LookupOption {
                    id: u.id,
                    label: u.username,
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(TicketLabels {
            customers: self.lookup_store.customer_options(&self.db, scope).await?,
            devices,
            users,
            statuses: self.lookup_store.request_statuses(&self.db).await?,
        })
    }

    /// New tickets nobody has picked up yet, within the caller's scope
    pub async fn home(&self, ctx: &RequestContext) -> Result<TicketListing, InternalError> {
        ctx.identity("view home")?;
        let scope = ctx.scope();

        let tickets = self
            .ticket_store
            .list(&self.db, &scope, &TicketFilter::awaiting_pickup())
            .await?;
        Ok(TicketListing {
            tickets,
            labels: self.labels(&scope).await?,
        })
    }

    /// Ticket form for everyone; staff also get every ticket
    pub async fn contact_page(&self, ctx: &RequestContext) -> Result<ContactPage, InternalError> {
        let identity = ctx.identity("view contact page")?;
        if identity.is_staff() {
            self.search(ctx, TicketFilter::default()).await
        } else {
            let scope = ctx.scope();
            Ok(ContactPage {
                devices: self
                    .asset_store
                    .list(&self.db, &scope, &AssetFilter::default())
                    .await?,
                tickets: Vec::new(),
                labels: self.labels(&scope).await?,
            })
        }
    }

    /// Staff ticket search, rendered on the contact page
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: TicketFilter,
    ) -> Result<ContactPage, InternalError> {
        ctx.require_staff("search tickets")?;
        let scope = ctx.scope();

        Ok(ContactPage {
            devices: self
                .asset_store
                .list(&self.db, &scope, &AssetFilter::default())
                .await?,
            tickets: self.ticket_store.list(&self.db, &scope, &filter).await?,
            labels: self.labels(&scope).await?,
        })
    }

    /// Raise a ticket. Duplicate submissions create duplicate tickets.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        payload: TicketPayload,
    ) -> Result<ticket::Model, InternalError> {
        let identity = ctx.identity("create ticket")?;
        self.ticket_provider.create(&self.db, identity, payload).await
    }

    /// Raise a ticket describing a request that failed with the error page
    pub async fn report_error(
        &self,
        ctx: &RequestContext,
        report: ErrorReport,
    ) -> Result<ticket::Model, InternalError> {
        let identity = ctx.identity("report error")?;
        let payload = TicketPayload {
            title: format!("Application error on {}", report.failed_path),
            description: report.description,
            device_id: None,
            customer_id: None,
        };

        let ticket = self.ticket_provider.create(&self.db, identity, payload).await?;
        tracing::warn!(
            "User {} reported an application error on {} (ticket {})",
            identity.user_id,
            report.failed_path,
            ticket.id
        );
        Ok(ticket)
    }

    pub async fn detail(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
    ) -> Result<TicketDetail, InternalError> {
        ctx.require_staff("view ticket")?;
        let scope = ctx.scope();

        let ticket = self.ticket_store.find(&self.db, &scope, ticket_id).await?;
        let notes = self.note_store.list_for_ticket(&self.db, ticket_id).await?;

        let device_filter = AssetFilter {
            customer_id: ticket.customer_id,
            ..AssetFilter::default()
        };
        let user_filter = UserFilter {
            customer_id: ticket.customer_id,
            ..UserFilter::default()
        };
        let devices = self.asset_store.list(&self.db, &scope, &device_filter).await?;
        let users = self.user_store.list(&self.db, &scope, &user_filter).await?;

        Ok(TicketDetail {
            ticket,
            notes,
            devices,
            users,
            labels: self.labels(&scope).await?,
        })
    }

    pub async fn add_note(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        body: String,
    ) -> Result<note::Model, InternalError> {
        let identity = ctx.identity("add note")?;
        self.ticket_provider
            .add_note(&self.db, identity, ticket_id, body)
            .await
    }

    pub async fn delete_note(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        note_id: i32,
    ) -> Result<(), InternalError> {
        let identity = ctx.require_staff("delete note")?;
        self.ticket_provider
            .delete_note(&self.db, identity, ticket_id, note_id)
            .await
    }

    pub async fn change(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
        change: TicketChange,
    ) -> Result<ticket::Model, InternalError> {
        let identity = ctx.require_staff("change ticket")?;
        self.ticket_provider
            .change(&self.db, identity, ticket_id, change)
            .await
    }

    pub async fn reassign(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
    ) -> Result<ticket::Model, InternalError> {
        let identity = ctx.require_staff("reassign ticket")?;
        self.ticket_provider
            .reassign(&self.db, identity, ticket_id)
            .await
    }

    pub async fn close(
        &self,
        ctx: &RequestContext,
        ticket_id: i32,
    ) -> Result<ticket::Model, InternalError> {
        let identity = ctx.require_staff("close ticket")?;
        self.ticket_provider.close(&self.db, identity, ticket_id).await
    }

    pub async fn delete(&self, ctx: &RequestContext, ticket_id: i32) -> Result<(), InternalError> {
        ctx.require_staff("delete ticket")?;
        self.ticket_store
            .delete(&self.db, &ctx.scope(), ticket_id)
            .await
    }
}
