use std::sync::Arc;

use clap::Parser;
use poem::{Server, listener::TcpListener};

use assetdesk::api::build_app;
use assetdesk::app_data::AppData;
use assetdesk::cli::{self, Cli, Commands};
use assetdesk::config::{
    BootstrapSettings, LoggingConfig, SystemEnvironment, init_database, init_logging,
    migrate_database,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let args = Cli::parse();

    let logging_config = LoggingConfig::from_env_provider(Arc::new(SystemEnvironment));
    init_logging(&logging_config)?;

    let settings = BootstrapSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let command = args.command();
    if command == Commands::Migrate {
        return cli::migrate::run_migrations(&settings).await;
    }

    let db = init_database(&settings).await?;
    migrate_database(&db).await?;

    let app_data = Arc::new(AppData::init(db, settings)?);

    match command {
        Commands::Serve => {
            let address = app_data.settings.server_address();
            tracing::info!("Starting server on http://{}", address);
            tracing::info!("Swagger UI available at http://{}/swagger", address);

            Server::new(TcpListener::bind(address))
                .run(build_app(app_data))
                .await?;
        }
        other => cli::execute_command(other, &app_data).await?,
    }

    Ok(())
}
