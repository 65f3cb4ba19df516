//! Process launcher for the bot's long-running workers.
//!
//! Loads an ecosystem file and keeps each listed process running until the launcher
//! receives ctrl-c, at which point the children are killed.

pub mod descriptor;
pub mod error;
pub mod supervisor;

use std::path::Path;

use tokio::task::JoinSet;

use self::{descriptor::Ecosystem, error::LaunchError, supervisor::RESTART_DELAY};

pub async fn run(path: &Path) -> Result<(), LaunchError> {
    let ecosystem = Ecosystem::load(path)?;

    tracing::info!(
        "Launching {} processes from {}",
        ecosystem.apps.len(),
        path.display()
    );

    let mut supervisors = JoinSet::new();
    for app in ecosystem.apps {
        supervisors.spawn(supervisor::supervise(app, RESTART_DELAY));
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down {} processes", supervisors.len());
                supervisors.shutdown().await;
                return Ok(());
            }
            joined = supervisors.join_next() => match joined {
                Some(Ok(Ok(()))) => {}
                // One failed app must not take the remaining processes down with it.
                Some(Ok(Err(e))) => tracing::error!("{}", e),
                Some(Err(e)) => tracing::error!("{}", LaunchError::from(e)),
                None => {
                    tracing::info!("All processes exited");
                    return Ok(());
                }
            },
        }
    }
}
