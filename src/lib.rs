//! buildpilot - pipeline driver for CMake projects
//!
//! Automates the fixed step sequence of configuring a named build
//! configuration, fetching Conan dependencies, generating build files and
//! invoking the build, against a swappable filesystem and command runner.

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod layout;
pub mod pipeline;

pub use error::{PilotError, PilotResult};
