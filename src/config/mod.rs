//! Configuration management for buildpilot

pub mod schema;

pub use schema::{BuildConfig, ConanConfig, Config, LayoutConfig, ScriptsConfig};

use crate::error::{PilotError, PilotResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "buildpilot.toml";

/// Configuration loader
pub struct ConfigManager {
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a config manager that discovers the config file itself
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a config manager with an explicit config file path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
        }
    }

    /// Get the global config file path
    pub fn global_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("buildpilot")
            .join("config.toml")
    }

    /// Load configuration for the given project root
    ///
    /// Resolution order: explicit path, `<root>/buildpilot.toml`, the global
    /// config file, built-in defaults.
    pub async fn load(&self, project_root: &Path) -> PilotResult<Config> {
        if let Some(ref path) = self.config_path {
            return self.load_from_file(path).await;
        }

        let local = project_root.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            debug!("Using local config: {}", local.display());
            return self.load_from_file(&local).await;
        }

        let global = Self::global_config_path();
        if global.exists() {
            debug!("Using global config: {}", global.display());
            return self.load_from_file(&global).await;
        }

        debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> PilotResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PilotError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| PilotError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new();

        let config = manager.load(temp.path()).await.unwrap();
        assert_eq!(config.layout.sources_dir, "Sources");
    }

    #[tokio::test]
    async fn load_local_config() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&local, "[layout]\nsources_dir = \"code\"\n").unwrap();

        let manager = ConfigManager::new();
        let config = manager.load(temp.path()).await.unwrap();
        assert_eq!(config.layout.sources_dir, "code");
    }

    #[tokio::test]
    async fn explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        let custom = temp.path().join("custom.toml");
        std::fs::write(&custom, "[build]\ndefault_cpus = 3\n").unwrap();
        std::fs::write(
            temp.path().join(LOCAL_CONFIG_FILE),
            "[build]\ndefault_cpus = 7\n",
        )
        .unwrap();

        let manager = ConfigManager::with_path(custom);
        let config = manager.load(temp.path()).await.unwrap();
        assert_eq!(config.build.default_cpus, 3);
    }

    #[tokio::test]
    async fn invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "not valid toml [").unwrap();

        let manager = ConfigManager::with_path(path);
        let err = manager.load(temp.path()).await.unwrap_err();
        assert!(matches!(err, PilotError::ConfigInvalid { .. }));
    }
}
