use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::ScopeError;
use crate::types::db::ticket::{self, ActiveModel, Entity as Ticket};
use crate::types::dto::tickets::TicketFilter;
use crate::types::internal::{AccessScope, RecordKind, TicketStatus};

/// Fields of a ticket about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub customer_id: Option<i32>,
    pub device_id: Option<i32>,
    pub created_by: Option<i32>,
}

/// Partial update; `None` leaves a column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketUpdate {
    pub status: Option<TicketStatus>,
    pub assigned_to: Option<Option<i32>>,
    pub customer_id: Option<Option<i32>>,
    pub device_id: Option<Option<i32>>,
    pub created_by: Option<Option<i32>>,
}

fn set_if<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match value {
        Some(v) => Set(v),
        None => ActiveValue::NotSet,
    }
}

/// Support requests, always read through the caller's `AccessScope`
pub struct TicketStore;

impl TicketStore {
    pub fn new() -> Self {
        Self
    }

    /// Newest first
    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        filter: &TicketFilter,
    ) -> Result<Vec<ticket::Model>, InternalError> {
        let mut condition = scope.condition(ticket::Column::CustomerId);

        if let Some(title) = &filter.title {
            condition = condition.add(ticket::Column::Title.contains(title));
        }
        if let Some(status_id) = filter.status_id {
            condition = condition.add(ticket::Column::StatusId.eq(status_id));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(ticket::Column::CustomerId.eq(customer_id));
        }
        if let Some(device_id) = filter.device_id {
            condition = condition.add(ticket::Column::DeviceId.eq(device_id));
        }
        if let Some(assigned_to) = filter.assigned_to {
            condition = condition.add(ticket::Column::AssignedTo.eq(assigned_to));
        }
        if filter.unassigned {
            condition = condition.add(ticket::Column::AssignedTo.is_null());
        }

        Ticket::find()
            .filter(condition)
            .order_by_desc(ticket::Column::CreatedAt)
            .order_by_desc(ticket::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_tickets", e))
    }

    /// New and In Progress tickets of one customer
    pub async fn list_open_for_customer(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        customer_id: i32,
    ) -> Result<Vec<ticket::Model>, InternalError> {
        Ticket::find()
            .filter(scope.condition(ticket::Column::CustomerId))
            .filter(ticket::Column::CustomerId.eq(customer_id))
            .filter(ticket::Column::StatusId.ne(TicketStatus::Closed.id()))
            .order_by_desc(ticket::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_open_tickets", e))
    }

    /// One ticket. Missing and out-of-scope ids are both `NotFound`.
    pub async fn find(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        ticket_id: i32,
    ) -> Result<ticket::Model, InternalError> {
        Ticket::find_by_id(ticket_id)
            .filter(scope.condition(ticket::Column::CustomerId))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_ticket", e))?
            .ok_or(InternalError::not_found(RecordKind::Ticket, ticket_id))
    }

    /// Insert a New ticket. The customer must be inside `scope`.
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        new_ticket: NewTicket,
    ) -> Result<ticket::Model, InternalError> {
        if !scope.permits(new_ticket.customer_id) {
            return Err(ScopeError::StaffOnly {
                operation: "create ticket for another customer",
            }
            .into());
        }

        let now = Utc::now().timestamp();
        let active = ActiveModel {
            title: Set(new_ticket.title),
            description: Set(new_ticket.description),
            customer_id: Set(new_ticket.customer_id),
            device_id: Set(new_ticket.device_id),
            created_by: Set(new_ticket.created_by),
            assigned_to: Set(None),
            status_id: Set(TicketStatus::New.id()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = active
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_ticket", e))?;

        tracing::info!(
            "Ticket {} raised for customer {:?}",
            created.id,
            created.customer_id
        );
        Ok(created)
    }

    /// Apply `changes` to a ticket already loaded through `find`
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        ticket_id: i32,
        changes: TicketUpdate,
    ) -> Result<ticket::Model, InternalError> {
        scope.require_unrestricted("update ticket")?;

        let active = ActiveModel {
            id: ActiveValue::Unchanged(ticket_id),
            status_id: set_if(changes.status.map(TicketStatus::id)),
            assigned_to: set_if(changes.assigned_to),
            customer_id: set_if(changes.customer_id),
            device_id: set_if(changes.device_id),
            created_by: set_if(changes.created_by),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_ticket", e))
    }

    /// Clear `device_id` on tickets that reference the device but belong to
    /// another customer. Returns the number of tickets detached.
    pub async fn detach_device_from_other_customers(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        device_id: i32,
        customer_id: i32,
    ) -> Result<u64, InternalError> {
        scope.require_unrestricted("detach device from tickets")?;

        let result = Ticket::update_many()
            .col_expr(ticket::Column::DeviceId, Expr::value(Option::<i32>::None))
            .col_expr(ticket::Column::UpdatedAt, Expr::value(Utc::now().timestamp()))
            .filter(ticket::Column::DeviceId.eq(device_id))
            .filter(
                Condition::any()
                    .add(ticket::Column::CustomerId.ne(customer_id))
                    .add(ticket::Column::CustomerId.is_null()),
            )
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("detach_ticket_device", e))?;

        if result.rows_affected > 0 {
            tracing::info!(
                "Detached device {} from {} ticket(s) outside customer {}",
                device_id,
                result.rows_affected,
                customer_id
            );
        }
        Ok(result.rows_affected)
    }

    /// Delete a ticket and its notes
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        scope: &AccessScope,
        ticket_id: i32,
    ) -> Result<(), InternalError> {
        scope.require_unrestricted("delete ticket")?;

        let result = Ticket::delete_by_id(ticket_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_ticket", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found(RecordKind::Ticket, ticket_id));
        }
        tracing::info!("Deleted ticket {}", ticket_id);
        Ok(())
    }
}

impl Default for TicketStore {
    fn default() -> Self {
        Self::new()
    }
}
