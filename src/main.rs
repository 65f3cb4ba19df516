mod cli;
mod launcher;
mod model;
mod server;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,evict_dashboard=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            use crate::server::{config::Config, startup};

            let result = match Config::from_env() {
                Ok(config) => startup::serve(config).await,
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Launch { config } => {
            if let Err(e) = launcher::run(&config).await {
                tracing::error!("Launcher error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
