// Form bodies and validated payloads
pub mod assets;
pub mod auth;
pub mod common;
pub mod customers;
pub mod fields;
pub mod tickets;
pub mod users;
