//! Resource Service - schema management for the organization/project/user store.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::DatabaseConfig;
use resource_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "resource-service")]
#[command(about = "Organization, project and user store")]
struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the store schema
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = DatabaseConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.url = url;
    }

    match cli.command {
        Commands::Migrate { action } => {
            resource_service_lib::run_migrations(&config, action).await?;
        }
    }

    Ok(())
}
