use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketError {
    #[error("Ticket {ticket_id} is closed")]
    Closed { ticket_id: i32 },

    #[error("Unknown ticket status id {status_id}")]
    UnknownStatus { status_id: i32 },
}
