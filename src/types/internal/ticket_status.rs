use std::fmt;

use crate::errors::internal::TicketError;

/// Ticket lifecycle, mirrored by the seeded `request_statuses` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    New = 1,
    InProgress = 2,
    Closed = 3,
}

impl TicketStatus {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl TryFrom<i32> for TicketStatus {
    type Error = TicketError;

    fn try_from(status_id: i32) -> Result<Self, Self::Error> {
        match status_id {
            1 => Ok(TicketStatus::New),
            2 => Ok(TicketStatus::InProgress),
            3 => Ok(TicketStatus::Closed),
            _ => Err(TicketError::UnknownStatus { status_id }),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
