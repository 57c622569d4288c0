//! Configuration loading and management
//!
//! Handles parsing of the optional `.td/config.toml` file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock::{write_atomic, DEFAULT_LOCK_TIMEOUT_MS};
use crate::state::{validate_state, State};

/// File name of the config inside the `.td/` directory
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Store locking
    #[serde(default)]
    pub lock: LockConfig,
}

/// Tasks configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// State given to new tasks when `--state` is not passed
    #[serde(default = "default_task_state")]
    pub default_state: String,
}

fn default_task_state() -> String {
    State::default().to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_state: default_task_state(),
        }
    }
}

/// Lock configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// How long mutating commands wait for the store lock
    #[serde(default = "default_lock_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl TasksConfig {
    /// The configured default state. Only valid after `Config::validate`.
    pub fn default_state(&self) -> State {
        validate_state(self.default_state.trim()).unwrap_or_default()
    }
}

impl Config {
    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a `.td/` directory.
    ///
    /// A missing file means defaults; a file that does not parse or
    /// validate is an error.
    pub fn load_from_dir(td_dir: &Path) -> Result<Self> {
        let config_path = td_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config, using defaults");
            return Ok(Self::default());
        }
        Self::load(&config_path).map_err(|err| match err {
            Error::TomlParse(parse) => Error::InvalidConfig(parse.to_string()),
            other => other,
        })
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_atomic(path, content.as_bytes())
    }

    fn validate(&self) -> Result<()> {
        validate_state(self.tasks.default_state.trim()).map_err(|_| {
            Error::InvalidConfig(format!(
                "tasks.default_state '{}' is not one of focus, active, later, done",
                self.tasks.default_state
            ))
        })?;
        if self.lock.timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "lock.timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.tasks.default_state, "active");
        assert_eq!(cfg.tasks.default_state(), State::Active);
        assert_eq!(cfg.lock.timeout_ms, DEFAULT_LOCK_TIMEOUT_MS);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
[tasks]
default_state = "later"

[lock]
timeout_ms = 250
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.tasks.default_state(), State::Later);
        assert_eq!(cfg.lock.timeout_ms, 250);
    }

    #[test]
    fn invalid_default_state_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[tasks]\ndefault_state = \"someday\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_lock_timeout_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[lock]\ntimeout_ms = 0").expect("write config");

        assert!(matches!(
            Config::load(&path),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn load_from_dir_defaults_only_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path()).expect("defaults");
        assert_eq!(cfg.tasks.default_state(), State::Active);

        fs::write(dir.path().join(CONFIG_FILE), "tasks = 123").expect("write config");
        assert!(matches!(
            Config::load_from_dir(dir.path()),
            Err(Error::InvalidConfig(_))
        ));

        fs::write(dir.path().join(CONFIG_FILE), "[tasks]\ndefault_state = \"someday\"")
            .expect("write config");
        assert!(matches!(
            Config::load_from_dir(dir.path()),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        Config::default().save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("default_state = \"active\""));
        assert!(written.contains("timeout_ms = 5000"));
    }
}
