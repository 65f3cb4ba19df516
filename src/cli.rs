use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "evict-dashboard", about = "Evict dashboard API server and process launcher")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the dashboard HTTP server (default)
    Serve,
    /// Launch and supervise the processes listed in an ecosystem file
    Launch {
        /// Path to the ecosystem TOML file
        #[arg(short, long, env = "ECOSYSTEM_FILE", default_value = "ecosystem.toml")]
        config: PathBuf,
    },
}
