//! Engine configuration loaded with figment
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (`kanban-dnd.toml` in the working directory unless a path is given)
//! 3. environment variables prefixed with `KANBAN_DND_`

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "kanban-dnd.toml";

/// Prefix of environment variables that override configuration
pub const ENV_PREFIX: &str = "KANBAN_DND_";

/// What happens to the board when a drag is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Keep every move committed during the drag; only clear drag state
    #[default]
    Keep,
    /// Move the dragged item back to where the drag started
    Rollback,
}

/// Runtime configuration for hosts of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cancel_policy: CancelPolicy,
    /// JSON file used by the file gateway
    pub board_file: PathBuf,
    /// Save after every committed board change
    pub autosave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cancel_policy: CancelPolicy::Keep,
            board_file: PathBuf::from("board.json"),
            autosave: true,
        }
    }
}

impl EngineConfig {
    /// Load from defaults, `kanban-dnd.toml` and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load using an explicit configuration file instead of the default one
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        debug!(?config, "loaded engine configuration");
        Ok(config)
    }

    /// Build the layered figment without extracting it
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = EngineConfig::load_from(Some(&temp.path().join("missing.toml"))).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.cancel_policy, CancelPolicy::Keep);
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanban-dnd.toml");
        std::fs::write(
            &path,
            "cancel_policy = \"rollback\"\nboard_file = \"boards/main.json\"\n",
        )
        .unwrap();

        let config = EngineConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.cancel_policy, CancelPolicy::Rollback);
        assert_eq!(config.board_file, PathBuf::from("boards/main.json"));
        assert!(config.autosave);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanban-dnd.toml");
        std::fs::write(&path, "autosave = true\n").unwrap();

        std::env::set_var("KANBAN_DND_AUTOSAVE", "false");
        let result = EngineConfig::load_from(Some(&path));
        std::env::remove_var("KANBAN_DND_AUTOSAVE");

        assert!(!result.unwrap().autosave);
    }

    #[test]
    #[serial]
    fn test_invalid_policy_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kanban-dnd.toml");
        std::fs::write(&path, "cancel_policy = \"sometimes\"\n").unwrap();

        assert!(EngineConfig::load_from(Some(&path)).is_err());
    }
}
