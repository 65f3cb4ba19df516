use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    /// The ecosystem file could not be read.
    #[error("Failed to read ecosystem file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The ecosystem file is not valid TOML or does not match the descriptor layout.
    #[error("Failed to parse ecosystem file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A descriptor failed validation.
    #[error("Invalid process descriptor: {0}")]
    Invalid(String),

    #[error("Failed to spawn process {name}: {source}")]
    Spawn {
        name: String,
        source: std::io::Error,
    },

    #[error("Failed to wait for process {name}: {source}")]
    Wait {
        name: String,
        source: std::io::Error,
    },

    /// A supervisor task panicked or was cancelled.
    #[error("Supervisor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
