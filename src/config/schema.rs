//! Configuration schema for buildpilot
//!
//! Configuration is read from `buildpilot.toml` in the project root, falling
//! back to `~/.config/buildpilot/config.toml`. Every field has a default so
//! both files are optional.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project directory names
    pub layout: LayoutConfig,

    /// Build step defaults
    pub build: BuildConfig,

    /// Conan integration settings
    pub conan: ConanConfig,

    /// Bootstrap script settings
    pub scripts: ScriptsConfig,
}

/// Names of the directories inside the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory holding the CMakeLists tree
    pub sources_dir: String,

    /// Directory receiving generated build files
    pub generated_dir: String,

    /// Directory holding the configuration files
    pub configuration_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sources_dir: "Sources".to_string(),
            generated_dir: "Generated".to_string(),
            configuration_dir: "Configuration".to_string(),
        }
    }
}

/// Defaults for the build step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Cores used when --cpus is not given (0 = all available)
    pub default_cpus: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { default_cpus: 0 }
    }
}

/// Conan integration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConanConfig {
    /// Filename prefix of per-configuration profile files
    pub profile_prefix: String,
}

impl Default for ConanConfig {
    fn default() -> Self {
        Self {
            profile_prefix: "ConanProfile-".to_string(),
        }
    }
}

/// Bootstrap script settings for the init step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Directory of script templates copied into the project root;
    /// the embedded defaults are used when unset
    pub template_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[layout]"));
        assert!(toml.contains("[build]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.layout.sources_dir, "Sources");
        assert_eq!(config.conan.profile_prefix, "ConanProfile-");
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [layout]
            generated_dir = "BuildOutput"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.layout.generated_dir, "BuildOutput");
        assert_eq!(config.layout.sources_dir, "Sources"); // default preserved
        assert!(config.scripts.template_dir.is_none());
    }
}
