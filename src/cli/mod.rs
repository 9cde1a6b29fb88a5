// CLI module for serving and administrative operations

pub mod bootstrap;
pub mod migrate;

use clap::{Parser, Subcommand};

use crate::app_data::AppData;

/// AssetDesk CLI
#[derive(Parser)]
#[command(name = "assetdesk")]
#[command(about = "Helpdesk and asset tracking web application", long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the web server
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create a level 1 (admin) account
    CreateAdmin {
        #[arg(long)]
        username: String,

        /// Generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

/// Execute an administrative command against initialized `AppData`.
///
/// `serve` and `migrate` are dispatched by `main` since they need the
/// listener or run before `AppData` exists.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    command: Commands,
    app_data: &AppData,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::CreateAdmin { username, password } => {
            let created = bootstrap::create_admin(app_data, &username, password).await?;

            println!("\n✓ Admin account created");
            println!("  Username: {}", created.username);
            if let Some(password) = created.generated_password {
                println!("  Password: {}", password);
                println!("  ⚠️  Store this password now, it is not shown again.\n");
            }
        }
        Commands::Serve | Commands::Migrate => {
            return Err(format!("{:?} is not an administrative command", command).into());
        }
    }

    Ok(())
}
