//! Process descriptors loaded from the ecosystem file.
//!
//! ```toml
//! [[apps]]
//! name = "evict-cluster-0"
//! script = "bot.py"
//! args = ["0"]
//! interpreter = "/root/evict/venv/bin/python"
//! cwd = "/root/evict"
//!
//! [apps.env]
//! CLUSTER_ID = "0"
//! ```

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tokio::process::Command;

use super::error::LaunchError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ecosystem {
    #[serde(default)]
    pub apps: Vec<ProcessDescriptor>,
}

/// A long-running process to launch and keep alive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessDescriptor {
    pub name: String,
    pub script: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Program that runs `script`; without one the script is executed directly.
    #[serde(default)]
    pub interpreter: Option<String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default = "default_autorestart")]
    pub autorestart: bool,
}

fn default_autorestart() -> bool {
    true
}

impl Ecosystem {
    /// Reads and validates the ecosystem file at `path`.
    pub fn load(path: &Path) -> Result<Self, LaunchError> {
        let content = std::fs::read_to_string(path).map_err(|source| LaunchError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, LaunchError> {
        let ecosystem: Ecosystem = toml::from_str(content)?;
        ecosystem.validate()?;

        Ok(ecosystem)
    }

    /// Requires at least one app, non-empty unique names and a non-empty script per app.
    pub fn validate(&self) -> Result<(), LaunchError> {
        if self.apps.is_empty() {
            return Err(LaunchError::Invalid(
                "ecosystem file defines no apps".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(LaunchError::Invalid("app name is empty".to_string()));
            }
            if app.script.trim().is_empty() {
                return Err(LaunchError::Invalid(format!(
                    "app {} has an empty script",
                    app.name
                )));
            }
            if !names.insert(app.name.as_str()) {
                return Err(LaunchError::Invalid(format!(
                    "app name {} is used more than once",
                    app.name
                )));
            }
        }

        Ok(())
    }
}

impl ProcessDescriptor {
    /// Builds the command: `interpreter script args...`, or `script args...`.
    pub fn command(&self) -> Command {
        let mut command = match self.interpreter.as_deref() {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(&self.script);
                command
            }
            None => Command::new(&self.script),
        };

        command.args(&self.args).envs(&self.env).kill_on_drop(true);
        if let Some(cwd) = self.cwd.as_ref() {
            command.current_dir(cwd);
        }

        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    const ECOSYSTEM: &str = r#"
[[apps]]
name = "evict-cluster-0"
script = "bot.py"
args = ["0"]
interpreter = "/root/evict/venv/bin/python"
cwd = "/root/evict"

[apps.env]
CLUSTER_ID = "0"
PYTHONPATH = "/root/evict"

[[apps]]
name = "vesta"
script = "/root/vesta/run.sh"
autorestart = false
"#;

    fn descriptor(name: &str, script: &str) -> ProcessDescriptor {
        ProcessDescriptor {
            name: name.to_string(),
            script: script.to_string(),
            args: Vec::new(),
            interpreter: None,
            cwd: None,
            env: BTreeMap::new(),
            autorestart: true,
        }
    }

    #[test]
    fn parses_apps_with_defaults() {
        let ecosystem = Ecosystem::parse(ECOSYSTEM).unwrap();

        assert_eq!(ecosystem.apps.len(), 2);
        let cluster = &ecosystem.apps[0];
        assert_eq!(cluster.args, vec!["0".to_string()]);
        assert_eq!(cluster.env.get("CLUSTER_ID").map(String::as_str), Some("0"));
        assert!(cluster.autorestart);
        assert!(!ecosystem.apps[1].autorestart);
        assert!(ecosystem.apps[1].interpreter.is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let ecosystem = Ecosystem {
            apps: vec![descriptor("vesta", "a.sh"), descriptor("vesta", "b.sh")],
        };

        assert!(matches!(ecosystem.validate(), Err(LaunchError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_name_or_script() {
        let no_name = Ecosystem {
            apps: vec![descriptor(" ", "run.sh")],
        };
        let no_script = Ecosystem {
            apps: vec![descriptor("vesta", "")],
        };

        assert!(matches!(no_name.validate(), Err(LaunchError::Invalid(_))));
        assert!(matches!(no_script.validate(), Err(LaunchError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(Ecosystem::parse(""), Err(LaunchError::Invalid(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Ecosystem::parse("[[apps]]\nname = "),
            Err(LaunchError::Parse(_))
        ));
    }

    #[test]
    fn interpreter_runs_script() {
        let ecosystem = Ecosystem::parse(ECOSYSTEM).unwrap();
        let command = ecosystem.apps[0].command();
        let command = command.as_std();

        assert_eq!(command.get_program(), "/root/evict/venv/bin/python");
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec![OsStr::new("bot.py"), OsStr::new("0")]
        );
        assert_eq!(
            command.get_current_dir(),
            Some(Path::new("/root/evict"))
        );
        assert!(command
            .get_envs()
            .any(|(key, value)| key == "CLUSTER_ID" && value == Some(OsStr::new("0"))));
    }

    #[test]
    fn script_runs_directly_without_interpreter() {
        let ecosystem = Ecosystem::parse(ECOSYSTEM).unwrap();
        let command = ecosystem.apps[1].command();
        let command = command.as_std();

        assert_eq!(command.get_program(), "/root/vesta/run.sh");
        assert_eq!(command.get_args().count(), 0);
        assert_eq!(command.get_current_dir(), None);
    }
}
