// Stores layer - Data access, every query scoped by the caller's AccessScope
pub mod asset_store;
pub mod customer_store;
pub mod lookup_store;
pub mod note_store;
pub mod ticket_store;
pub mod user_store;

pub use asset_store::AssetStore;
pub use customer_store::CustomerStore;
pub use lookup_store::{LookupOption, LookupStore};
pub use note_store::NoteStore;
pub use ticket_store::{NewTicket, TicketStore, TicketUpdate};
pub use user_store::{UserForAuth, UserStore};
