use std::sync::Arc;

use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::errors::InternalError;
use crate::errors::internal::{TicketError, ValidationError};
use crate::stores::{
    AssetStore, LookupStore, NewTicket, NoteStore, TicketStore, TicketUpdate, UserStore,
};
use crate::types::db::{note, ticket};
use crate::types::dto::tickets::{TicketChange, TicketPayload};
use crate::types::internal::{AccessScope, AuthLevel, RecordKind, SessionIdentity, TicketStatus};

/// Status of a stored ticket row
pub fn status_of(ticket: &ticket::Model) -> Result<TicketStatus, TicketError> {
    TicketStatus::try_from(ticket.status_id)
}

/// Reassign `ticket` to `actor_id`.
///
/// New moves to InProgress, InProgress keeps its status. Closed is rejected.
pub fn reassign_transition(
    ticket: &ticket::Model,
    actor_id: i32,
) -> Result<TicketUpdate, TicketError> {
    let status = match status_of(ticket)? {
        TicketStatus::Closed => return Err(TicketError::Closed { ticket_id: ticket.id }),
        TicketStatus::New => Some(TicketStatus::InProgress),
        TicketStatus::InProgress => None,
    };

    Ok(TicketUpdate {
        status,
        assigned_to: Some(Some(actor_id)),
        ..TicketUpdate::default()
    })
}

/// Close `ticket`, or `None` when it is already closed
pub fn close_transition(ticket: &ticket::Model) -> Result<Option<TicketUpdate>, TicketError> {
    if status_of(ticket)? == TicketStatus::Closed {
        return Ok(None);
    }
    Ok(Some(TicketUpdate {
        status: Some(TicketStatus::Closed),
        ..TicketUpdate::default()
    }))
}

/// Move the ticket to `device_id`. The customer follows the device.
pub fn device_transition(
    ticket: &ticket::Model,
    device_id: i32,
    device_customer_id: i32,
) -> TicketUpdate {
    let customer_id = (ticket.customer_id != Some(device_customer_id))
        .then_some(Some(device_customer_id));

    TicketUpdate {
        device_id: Some(Some(device_id)),
        customer_id,
        ..TicketUpdate::default()
    }
}

/// Move the ticket to `customer_id`.
///
/// `device_customer_id` is the owner of the ticket's current device, if it
/// has one. The device is dropped when the owner no longer matches.
pub fn customer_transition(
    ticket: &ticket::Model,
    customer_id: i32,
    device_customer_id: Option<i32>,
) -> TicketUpdate {
    let device_id = match (ticket.device_id, device_customer_id) {
        (Some(_), Some(owner)) if owner == customer_id => None,
        (Some(_), _) => Some(None),
        (None, _) => None,
    };

    TicketUpdate {
        customer_id: Some(Some(customer_id)),
        device_id,
        ..TicketUpdate::default()
    }
}

/// Set the requesting user.
///
/// A customer user of another customer pulls the ticket over to their
/// customer, applying the same device rule as `customer_transition`.
pub fn user_transition(
    ticket: &ticket::Model,
    user_id: i32,
    user_level: AuthLevel,
    user_customer_id: Option<i32>,
    device_customer_id: Option<i32>,
) -> TicketUpdate {
    let mut update = match (user_level, user_customer_id) {
        (AuthLevel::Customer, Some(customer_id)) if ticket.customer_id != Some(customer_id) => {
            customer_transition(ticket, customer_id, device_customer_id)
        }
        _ => TicketUpdate::default(),
    };
    update.created_by = Some(Some(user_id));
    update
}

/// Ticket workflow: creation rules, status transitions and the edits made
/// from the ticket page.
///
/// Transitions are computed by the free functions above and applied here.
pub struct TicketProvider {
    ticket_store: Arc<TicketStore>,
    note_store: Arc<NoteStore>,
    asset_store: Arc<AssetStore>,
    user_store: Arc<UserStore>,
    lookup_store: Arc<LookupStore>,
}

impl TicketProvider {
    pub fn new(
        ticket_store: Arc<TicketStore>,
        note_store: Arc<NoteStore>,
        asset_store: Arc<AssetStore>,
        user_store: Arc<UserStore>,
        lookup_store: Arc<LookupStore>,
    ) -> Self {
        Self {
            ticket_store,
            note_store,
            asset_store,
            user_store,
            lookup_store,
        }
    }

    /// Raise a ticket on behalf of `identity`.
    ///
    /// Customer users always raise against their own customer; a submitted
    /// customer is ignored and a submitted device must be theirs. Staff may
    /// name any customer and device; a ticket with a device but no customer
    /// takes the device's customer.
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        identity: &SessionIdentity,
        payload: TicketPayload,
    ) -> Result<ticket::Model, InternalError> {
        let scope = identity.scope();

        let (customer_id, device_id) = if identity.is_staff() {
            self.staff_ticket_owner(conn, &scope, &payload).await?
        } else {
            let customer_id = scope
                .customer_id()
                .ok_or(ValidationError::CustomerRequired)?;

            if let Some(device_id) = payload.device_id {
                self.asset_store
                    .find(conn, &scope, device_id)
                    .await
                    .map_err(|e| match e {
                        InternalError::NotFound { .. } => {
                            ValidationError::DeviceOutsideCustomer.into()
                        }
                        other => other,
                    })?;
            }
            (Some(customer_id), payload.device_id)
        };

        self.ticket_store
            .create(
                conn,
                &scope,
                NewTicket {
                    title: payload.title,
                    description: payload.description,
                    customer_id,
                    device_id,
                    created_by: Some(identity.user_id),
                },
            )
            .await
    }

    async fn staff_ticket_owner(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        payload: &TicketPayload,
    ) -> Result<(Option<i32>, Option<i32>), InternalError> {
        if let Some(customer_id) = payload.customer_id {
            self.lookup_store
                .ensure_customer(conn, scope, customer_id)
                .await?;
        }

        let Some(device_id) = payload.device_id else {
            return Ok((payload.customer_id, None));
        };

        let device = self
            .asset_store
            .find(conn, scope, device_id)
            .await
            .map_err(|e| unknown_reference(e, RecordKind::Asset, "device_id", "device"))?;

        match payload.customer_id {
            Some(customer_id) if customer_id != device.customer_id => {
                Err(ValidationError::DeviceOutsideCustomer.into())
            }
            _ => Ok((Some(device.customer_id), Some(device_id))),
        }
    }

    /// Assign the ticket to the acting staff member
    pub async fn reassign(
        &self,
        conn: &impl ConnectionTrait,
        identity: &SessionIdentity,
        ticket_id: i32,
    ) -> Result<ticket::Model, InternalError> {
        let scope = identity.scope();
        scope.require_unrestricted("reassign ticket")?;

        let ticket = self.ticket_store.find(conn, &scope, ticket_id).await?;
        let update = reassign_transition(&ticket, identity.user_id)?;
        let updated = self.ticket_store.update(conn, &scope, ticket_id, update).await?;

        tracing::info!("Ticket {} assigned to user {}", ticket_id, identity.user_id);
        Ok(updated)
    }

    /// Close the ticket and record who closed it.
    ///
    /// The status change and the system note are written in one transaction.
    /// Closing a closed ticket changes nothing.
    pub async fn close<C>(
        &self,
        conn: &C,
        identity: &SessionIdentity,
        ticket_id: i32,
    ) -> Result<ticket::Model, InternalError>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let scope = identity.scope();
        scope.require_unrestricted("close ticket")?;

        let txn = conn.begin().await.map_err(InternalError::transaction_begin)?;

        let ticket = self.ticket_store.find(&txn, &scope, ticket_id).await?;
        let Some(update) = close_transition(&ticket)? else {
            tracing::debug!("Ticket {} already closed", ticket_id);
            return Ok(ticket);
        };

        let closed = self.ticket_store.update(&txn, &scope, ticket_id, update).await?;
        let closed_by = match self.user_store.find(&txn, &scope, identity.user_id).await {
            Ok(user) => user.username,
            Err(InternalError::NotFound { .. }) => identity.username.clone(),
            Err(e) => return Err(e),
        };
        self.note_store
            .create(
                &txn,
                ticket_id,
                format!("Ticket closed by {}", closed_by),
                Some(identity.user_id),
                true,
            )
            .await?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        tracing::info!("Ticket {} closed by user {}", ticket_id, identity.user_id);
        Ok(closed)
    }

    /// Apply a device, customer or requester change from the ticket page
    pub async fn change(
        &self,
        conn: &impl ConnectionTrait,
        identity: &SessionIdentity,
        ticket_id: i32,
        change: TicketChange,
    ) -> Result<ticket::Model, InternalError> {
        let scope = identity.scope();
        scope.require_unrestricted("change ticket")?;

        let ticket = self.ticket_store.find(conn, &scope, ticket_id).await?;

        let update = match change {
            TicketChange::Device(device_id) => {
                let device = self
                    .asset_store
                    .find(conn, &scope, device_id)
                    .await
                    .map_err(|e| unknown_reference(e, RecordKind::Asset, "device_id", "device"))?;
                device_transition(&ticket, device.id, device.customer_id)
            }
            TicketChange::Customer(customer_id) => {
                self.lookup_store
                    .ensure_customer(conn, &scope, customer_id)
                    .await?;
                let device_owner = self.device_owner(conn, &scope, &ticket).await?;
                customer_transition(&ticket, customer_id, device_owner)
            }
            TicketChange::User(user_id) => {
                let user = self
                    .user_store
                    .find(conn, &scope, user_id)
                    .await
                    .map_err(|e| unknown_reference(e, RecordKind::User, "user_id", "user"))?;
                let level = AuthLevel::try_from(user.auth_level)?;
                let device_owner = self.device_owner(conn, &scope, &ticket).await?;
                user_transition(&ticket, user.id, level, user.customer_id, device_owner)
            }
        };

        let updated = self.ticket_store.update(conn, &scope, ticket_id, update).await?;
        tracing::info!("Ticket {} changed: {:?}", ticket_id, change);
        Ok(updated)
    }

    async fn device_owner(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        ticket: &ticket::Model,
    ) -> Result<Option<i32>, InternalError> {
        let Some(device_id) = ticket.device_id else {
            return Ok(None);
        };
        match self.asset_store.find(conn, scope, device_id).await {
            Ok(device) => Ok(Some(device.customer_id)),
            Err(InternalError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Append a note written by `identity`
    pub async fn add_note(
        &self,
        conn: &impl ConnectionTrait,
        identity: &SessionIdentity,
        ticket_id: i32,
        body: String,
    ) -> Result<note::Model, InternalError> {
        let scope = identity.scope();
        let ticket = self.ticket_store.find(conn, &scope, ticket_id).await?;

        self.note_store
            .create(conn, ticket.id, body, Some(identity.user_id), false)
            .await
    }

    pub async fn delete_note(
        &self,
        conn: &impl ConnectionTrait,
        identity: &SessionIdentity,
        ticket_id: i32,
        note_id: i32,
    ) -> Result<(), InternalError> {
        let scope = identity.scope();
        scope.require_unrestricted("delete note")?;
        self.ticket_store.find(conn, &scope, ticket_id).await?;
        self.note_store.delete(conn, ticket_id, note_id).await
    }
}

/// A referenced row that does not exist is a form problem, not a missing page
fn unknown_reference(
    err: InternalError,
    kind: RecordKind,
    field: &'static str,
    label: &'static str,
) -> InternalError {
    match err {
        InternalError::NotFound { kind: found, .. } if found == kind => {
            ValidationError::unknown(field, label).into()
        }
        other => other,
    }
}
