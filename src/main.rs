use anyhow::Result;
use clap::{Parser, Subcommand};
use scimgate_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "scimgate-core", version, about = "Multi-tenant SCIM 2.0 provisioning service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let prometheus_handle = telemetry::init(&config.telemetry)?;

            info!("Starting Scimgate Core");
            info!("HTTP server listening on {}", config.http_addr());
            info!("SCIM base URL: {}", config.scim.base_url);

            server::run(config, prometheus_handle).await
        }
        Command::Migrate => {
            config.telemetry.metrics_enabled = false;
            telemetry::init(&config.telemetry)?;
            migration::run_migrations(&config).await
        }
    }
}
