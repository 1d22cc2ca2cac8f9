//! Typed option structures for the pipeline steps
//!
//! Each step takes an explicit options struct with named fields instead of a
//! loose key-indexed argument bag, so defaults are visible in one place.

use std::path::PathBuf;

/// Options for the init step
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Directory of script templates to copy into the project root; the
    /// embedded wrapper scripts are used when unset
    pub template_dir: Option<PathBuf>,
}

/// Options for the configure step
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Name of the configuration to create; required unless `list` is set
    pub name: Option<String>,

    /// Parent configuration to inherit from; defaults to `name` itself
    pub inherits: Option<String>,

    /// List the available configurations instead of creating one
    pub list: bool,

    /// `KEY=VALUE` variable overrides written into the configuration file
    pub definitions: Vec<String>,
}

/// Options for the dependency step
#[derive(Debug, Clone, Default)]
pub struct DepsOptions {
    /// Configuration name; defaults to the first existing configuration
    pub name: Option<String>,
}

/// Options for the generate step
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Configuration name; defaults to the first existing configuration
    pub name: Option<String>,

    /// Delete the build directory first for a clean build tree
    pub clean: bool,
}

/// Options for the build step
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Configuration name; defaults to the first configuration that has
    /// generated build files
    pub name: Option<String>,

    /// Build target; the build tool's default target when unset
    pub target: Option<String>,

    /// Build type for multi-config generators, usually Debug or Release
    pub build_type: Option<String>,

    /// Pass --clean-first to the build tool for a fresh rebuild
    pub clean: bool,

    /// Number of cores to build with; auto-detected when unset
    pub cpus: Option<usize>,
}
