// Providers layer - Work performers and business logic
//
// Providers hold the rules coordinators compose: credential checks, route
// authorization, password hashing and the ticket workflow.

pub mod authentication_provider;
pub mod authorization_provider;
pub mod crypto_provider;
pub mod ticket_provider;

pub use authentication_provider::{AuthenticationProvider, LoginRequest, LoginResponse};
pub use authorization_provider::{Authorization, authorize};
pub use crypto_provider::CryptoProvider;
pub use ticket_provider::TicketProvider;
