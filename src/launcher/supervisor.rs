use std::time::Duration;

use super::{descriptor::ProcessDescriptor, error::LaunchError};

/// Pause between a process exiting and its restart.
pub const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Runs `descriptor` until it exits, restarting it after `delay` while `autorestart` is set.
///
/// # Returns
/// - `Ok(())` - The process exited and is not restarted
/// - `Err(Spawn)` - The process could not be started
/// - `Err(Wait)` - The exit status could not be read
pub async fn supervise(descriptor: ProcessDescriptor, delay: Duration) -> Result<(), LaunchError> {
    let mut restarts: u64 = 0;

    loop {
        let mut child = descriptor
            .command()
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                name: descriptor.name.clone(),
                source,
            })?;

        tracing::info!(
            "Started {} (pid {})",
            descriptor.name,
            child.id().unwrap_or_default()
        );

        let status = child.wait().await.map_err(|source| LaunchError::Wait {
            name: descriptor.name.clone(),
            source,
        })?;

        if !descriptor.autorestart {
            tracing::info!("{} exited with {}", descriptor.name, status);
            return Ok(());
        }

        restarts += 1;
        tracing::warn!(
            "{} exited with {}, restarting in {:?} (restart #{})",
            descriptor.name,
            status,
            delay,
            restarts
        );

        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn shell(name: &str, command: &str, autorestart: bool) -> ProcessDescriptor {
        ProcessDescriptor {
            name: name.to_string(),
            script: "-c".to_string(),
            args: vec![command.to_string()],
            interpreter: Some("/bin/sh".to_string()),
            cwd: None,
            env: BTreeMap::new(),
            autorestart,
        }
    }

    #[tokio::test]
    async fn returns_when_autorestart_is_off() {
        let result = supervise(shell("once", "exit 3", false), Duration::from_millis(1)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn restarts_exited_process() {
        let dir = tempfile::tempdir().unwrap();
        let mut descriptor = shell("looping", "echo run >> runs.txt", true);
        descriptor.cwd = Some(dir.path().to_path_buf());

        let result = tokio::time::timeout(
            Duration::from_millis(500),
            supervise(descriptor, Duration::from_millis(20)),
        )
        .await;
        assert!(result.is_err(), "supervisor should still be running");

        let runs = std::fs::read_to_string(dir.path().join("runs.txt")).unwrap();
        assert!(runs.lines().count() >= 2);
    }

    #[tokio::test]
    async fn reports_missing_program() {
        let mut descriptor = shell("missing", "", false);
        descriptor.interpreter = Some("/nonexistent/interpreter".to_string());

        let result = supervise(descriptor, Duration::from_millis(1)).await;

        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }
}
