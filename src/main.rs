use anyhow::Result;
use clap::{Parser, Subcommand};
use drinks_api::{config::Config, migration, server, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(name = "drinks-api", version, about = "Drinks menu API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Remove every drink and seed a single `water` drink before starting.
    #[arg(long, global = true)]
    reset_db: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the database and serve HTTP (default).
    Serve,
    /// Initialize the database and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let metrics = telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting Drinks API");
            migration::init_database(&config, cli.reset_db).await?;
            server::run(config, metrics).await
        }
        Command::Migrate => {
            migration::init_database(&config, cli.reset_db).await?;
            info!("Database initialized");
            Ok(())
        }
    }
}
