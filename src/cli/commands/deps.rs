//! Deps command - fetch external packages with Conan

use crate::cli::args::DepsArgs;
use crate::config::Config;
use crate::error::PilotResult;
use crate::pipeline::{DepsOptions, DepsOutcome};
use console::style;
use std::path::Path;

/// Execute the deps command
pub async fn execute(args: DepsArgs, config: &Config, project_root: &Path) -> PilotResult<()> {
    let mut pipeline = super::real_pipeline(config, project_root);

    match pipeline.deps(DepsOptions { name: args.name }).await? {
        DepsOutcome::NoConanfile => {
            println!("Found no conanfile. No external packages were acquired.");
        }
        DepsOutcome::Installed { config } => {
            println!(
                "{} Dependencies installed for configuration {}",
                style("✓").green(),
                style(config).cyan()
            );
        }
    }
    Ok(())
}
