use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::BootstrapSettings;
use crate::errors::InternalError;
use crate::providers::CryptoProvider;
use crate::stores::{AssetStore, CustomerStore, LookupStore, NoteStore, TicketStore, UserStore};

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(db, settings)
///   ↓ creates once
///   ├─ db (DatabaseConnection)
///   ├─ crypto_provider (Arc<CryptoProvider>, holds the pepper)
///   └─ asset/customer/user/ticket/note/lookup stores
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to Coordinators::new
///   └─ each coordinator extracts stores and creates its providers
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: BootstrapSettings,
    pub crypto_provider: Arc<CryptoProvider>,
    pub asset_store: Arc<AssetStore>,
    pub customer_store: Arc<CustomerStore>,
    pub user_store: Arc<UserStore>,
    pub ticket_store: Arc<TicketStore>,
    pub note_store: Arc<NoteStore>,
    pub lookup_store: Arc<LookupStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when the password hasher cannot be built
    /// from the configured pepper
    pub fn init(
        db: DatabaseConnection,
        settings: BootstrapSettings,
    ) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let crypto_provider = Arc::new(CryptoProvider::new(
            settings.password_pepper().map(str::to_owned),
        )?);

        tracing::debug!("Creating stores...");
        let app_data = Self {
            db,
            settings,
            crypto_provider,
            asset_store: Arc::new(AssetStore::new()),
            customer_store: Arc::new(CustomerStore::new()),
            user_store: Arc::new(UserStore::new()),
            ticket_store: Arc::new(TicketStore::new()),
            note_store: Arc::new(NoteStore::new()),
            lookup_store: Arc::new(LookupStore::new()),
        };

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }
}
