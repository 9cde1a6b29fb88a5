use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::types::db::note::{self, ActiveModel, Entity as Note};
use crate::types::internal::RecordKind;

/// Ticket notes. Callers load the ticket through `TicketStore::find` first,
/// which applies the scope.
pub struct NoteStore;

impl NoteStore {
    pub fn new() -> Self {
        Self
    }

    /// Oldest first
    pub async fn list_for_ticket(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
    ) -> Result<Vec<note::Model>, InternalError> {
        Note::find()
            .filter(note::Column::TicketId.eq(ticket_id))
            .order_by_asc(note::Column::CreatedAt)
            .order_by_asc(note::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_notes", e))
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        body: String,
        created_by: Option<i32>,
        is_system: bool,
    ) -> Result<note::Model, InternalError> {
        let active = ActiveModel {
            ticket_id: Set(ticket_id),
            body: Set(body),
            created_by: Set(created_by),
            is_system: Set(is_system),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        active
            .insert(conn)
            .await
            .map_err(|e| InternalError::database("create_note", e))
    }

    /// Delete a note of `ticket_id`. A note of another ticket is `NotFound`.
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        ticket_id: i32,
        note_id: i32,
    ) -> Result<(), InternalError> {
        let result = Note::delete_many()
            .filter(note::Column::Id.eq(note_id))
            .filter(note::Column::TicketId.eq(ticket_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_note", e))?;

        if result.rows_affected == 0 {
            return Err(InternalError::not_found(RecordKind::Note, note_id));
        }
        Ok(())
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}
