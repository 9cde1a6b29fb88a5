use std::fmt;

/// Record kinds addressed by id in the web interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Asset,
    Customer,
    User,
    Ticket,
    Note,
}

impl RecordKind {
    /// Page listing records of this kind
    pub fn list_path(self) -> &'static str {
        match self {
            RecordKind::Asset => "/assets",
            RecordKind::Customer => "/customers",
            RecordKind::User => "/users",
            RecordKind::Ticket | RecordKind::Note => "/contact",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Asset => "Asset",
            RecordKind::Customer => "Customer",
            RecordKind::User => "User",
            RecordKind::Ticket => "Ticket",
            RecordKind::Note => "Note",
        };
        f.write_str(name)
    }
}
