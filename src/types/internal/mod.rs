// Internal types - domain values shared across layers
pub mod auth_level;
pub mod context;
pub mod identity;
pub mod record_kind;
pub mod scope;
pub mod ticket_status;

pub use auth_level::AuthLevel;
pub use context::{RequestContext, RequestId, RequestSource};
pub use identity::SessionIdentity;
pub use record_kind::RecordKind;
pub use scope::AccessScope;
pub use ticket_status::TicketStatus;
