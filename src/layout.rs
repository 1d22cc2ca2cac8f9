//! Project directory layout
//!
//! Knows where everything lives inside a pipeline-managed project tree.
//! Directory names come from the tool configuration so projects can deviate
//! from the `Sources`/`Generated`/`Configuration` defaults.

use crate::config::LayoutConfig;
use std::path::{Path, PathBuf};

/// Name of the CMake cache file whose presence marks a generated configuration
pub const CACHE_MARKER_FILE: &str = "CMakeCache.txt";

/// Name of the dependency-graph artifact written during generation
pub const DEPENDENCY_GRAPH_FILE: &str = "Dependencies.dot";

/// Suffix of configuration files in the configuration directory
pub const CONFIG_FILE_SUFFIX: &str = ".config.cmake";

/// Name of the version stamp file written by `init`
pub const VERSION_STAMP_FILE: &str = ".buildpilot-version";

/// Resolves every path of interest inside one project root
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    sources_dir: String,
    generated_dir: String,
    configuration_dir: String,
}

impl ProjectLayout {
    /// Create a layout for the given project root
    pub fn new(root: impl Into<PathBuf>, config: &LayoutConfig) -> Self {
        Self {
            root: root.into(),
            sources_dir: config.sources_dir.clone(),
            generated_dir: config.generated_dir.clone(),
            configuration_dir: config.configuration_dir.clone(),
        }
    }

    /// The project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the CMakeLists tree
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join(&self.sources_dir)
    }

    /// Directory holding build-tool output, one subdirectory per configuration
    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(&self.generated_dir)
    }

    /// Directory holding one file per named configuration
    pub fn configuration_dir(&self) -> PathBuf {
        self.root.join(&self.configuration_dir)
    }

    /// The configuration file for a named configuration
    pub fn config_file(&self, config_name: &str) -> PathBuf {
        self.configuration_dir()
            .join(format!("{config_name}{CONFIG_FILE_SUFFIX}"))
    }

    /// The build directory of a named configuration
    pub fn build_dir(&self, config_name: &str) -> PathBuf {
        self.generated_dir().join(config_name)
    }

    /// The cache marker whose presence signals the configuration has been
    /// generated at least once
    pub fn cache_file(&self, config_name: &str) -> PathBuf {
        self.build_dir(config_name).join(CACHE_MARKER_FILE)
    }

    /// The dependency-graph artifact of a named configuration
    pub fn dependency_graph_file(&self, config_name: &str) -> PathBuf {
        self.build_dir(config_name).join(DEPENDENCY_GRAPH_FILE)
    }

    /// The CMake script that generates configuration files
    pub fn config_script(&self) -> PathBuf {
        self.sources_dir().join("BuildTooling/Scripts/createConfigFile.cmake")
    }

    /// The Conan recipe; its absence disables the dependency step
    pub fn conan_file(&self) -> PathBuf {
        self.sources_dir().join("conanfile.txt")
    }

    /// The Conan profile of a named configuration
    pub fn conan_profile(&self, config_name: &str, profile_prefix: &str) -> PathBuf {
        self.configuration_dir()
            .join(format!("{profile_prefix}{config_name}"))
    }

    /// The version stamp written into the project root by `init`
    pub fn version_stamp_file(&self) -> PathBuf {
        self.root.join(VERSION_STAMP_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/proj", &LayoutConfig::default())
    }

    #[test]
    fn default_directories() {
        let layout = layout();
        assert_eq!(layout.sources_dir(), PathBuf::from("/proj/Sources"));
        assert_eq!(layout.generated_dir(), PathBuf::from("/proj/Generated"));
        assert_eq!(
            layout.configuration_dir(),
            PathBuf::from("/proj/Configuration")
        );
    }

    #[test]
    fn per_config_paths() {
        let layout = layout();
        assert_eq!(
            layout.config_file("MyConfig"),
            PathBuf::from("/proj/Configuration/MyConfig.config.cmake")
        );
        assert_eq!(
            layout.cache_file("MyConfig"),
            PathBuf::from("/proj/Generated/MyConfig/CMakeCache.txt")
        );
        assert_eq!(
            layout.dependency_graph_file("MyConfig"),
            PathBuf::from("/proj/Generated/MyConfig/Dependencies.dot")
        );
        assert_eq!(
            layout.conan_profile("MyConfig", "ConanProfile-"),
            PathBuf::from("/proj/Configuration/ConanProfile-MyConfig")
        );
    }

    #[test]
    fn custom_directory_names() {
        let config = LayoutConfig {
            sources_dir: "src".to_string(),
            generated_dir: "out".to_string(),
            configuration_dir: "configs".to_string(),
        };
        let layout = ProjectLayout::new("/p", &config);
        assert_eq!(layout.build_dir("A"), PathBuf::from("/p/out/A"));
        assert_eq!(
            layout.config_file("A"),
            PathBuf::from("/p/configs/A.config.cmake")
        );
    }
}
