// Coordinators layer - Workflow orchestration
//
// Coordinators compose store and provider operations for the web handlers.
// Each takes the request's RequestContext and checks the caller's level
// before touching data.

pub mod asset_coordinator;
pub mod customer_coordinator;
pub mod login_coordinator;
pub mod ticket_coordinator;
pub mod user_coordinator;

use std::sync::Arc;

use crate::app_data::AppData;

pub use asset_coordinator::{AssetCoordinator, AssetDetail, AssetListing, AssetLookups};
pub use customer_coordinator::{CustomerCoordinator, CustomerDetail};
pub use login_coordinator::LoginCoordinator;
pub use ticket_coordinator::{
    ContactPage, ErrorReport, TicketCoordinator, TicketDetail, TicketLabels, TicketListing,
};
pub use user_coordinator::{UserCoordinator, UserDetail, UserListing};

/// Every coordinator, built once from `AppData` and shared with handlers
pub struct Coordinators {
    pub login: LoginCoordinator,
    pub assets: AssetCoordinator,
    pub customers: CustomerCoordinator,
    pub users: UserCoordinator,
    pub tickets: TicketCoordinator,
}

impl Coordinators {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            login: LoginCoordinator::new(app_data.clone()),
            assets: AssetCoordinator::new(app_data.clone()),
            customers: CustomerCoordinator::new(app_data.clone()),
            users: UserCoordinator::new(app_data.clone()),
            tickets: TicketCoordinator::new(app_data),
        }
    }
}
