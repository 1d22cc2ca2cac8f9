//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// buildpilot - CMake pipeline driver
///
/// Drives the fixed pipeline of a CMake project: configure a named build
/// configuration, fetch Conan dependencies, generate build files and run
/// the build.
#[derive(Parser, Debug)]
#[command(name = "buildpilot")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Project root directory (defaults to the current directory)
    #[arg(short, long, global = true, env = "BUILDPILOT_PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUILDPILOT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands, one per pipeline step
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Place the bootstrap wrapper scripts into the project root
    Init(InitArgs),

    /// Create a named build configuration file
    Configure(ConfigureArgs),

    /// Fetch external packages with Conan
    Deps(DepsArgs),

    /// Run CMake to generate the build files
    Generate(GenerateArgs),

    /// Build a configuration
    Build(BuildArgs),
}

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Copy script templates from this directory instead of the built-in ones
    #[arg(short, long)]
    pub templates: Option<PathBuf>,
}

/// Arguments for the configure command
#[derive(Parser, Debug)]
pub struct ConfigureArgs {
    /// Name of the configuration to create
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// Existing configuration to inherit variable definitions from
    #[arg(short, long)]
    pub inherits: Option<String>,

    /// List the available configurations instead of creating one
    #[arg(short, long, conflicts_with_all = ["name", "inherits", "define"])]
    pub list: bool,

    /// CMake variable override for the generated file (KEY=VALUE, repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub define: Vec<String>,
}

/// Arguments for the deps command
#[derive(Parser, Debug)]
pub struct DepsArgs {
    /// Configuration name (defaults to the first existing configuration)
    pub name: Option<String>,
}

/// Arguments for the generate command
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Configuration name (defaults to the first existing configuration)
    pub name: Option<String>,

    /// Delete the generated directory first to get a clean build tree
    #[arg(long)]
    pub clean: bool,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Configuration name (defaults to the first already-generated one)
    pub name: Option<String>,

    /// Build target
    #[arg(short, long)]
    pub target: Option<String>,

    /// Build type for multi-config generators, usually Debug or Release
    #[arg(long, value_name = "BUILD_TYPE")]
    pub build_type: Option<String>,

    /// Trigger a fresh rebuild with --clean-first
    #[arg(long)]
    pub clean: bool,

    /// Number of cpu cores to build with
    #[arg(long)]
    pub cpus: Option<usize>,
}
