use crate::config::{BootstrapSettings, init_database, migrate_database};

/// Connect to the configured database and apply all pending migrations.
///
/// Does not build `AppData`.
///
/// # Returns
/// * `Ok(())` - Migrations completed successfully
/// * `Err(...)` - Connection or migration failed
pub async fn run_migrations(
    settings: &BootstrapSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
