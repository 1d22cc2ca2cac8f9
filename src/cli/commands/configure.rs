//! Configure command - create a named build configuration file

use crate::cli::args::ConfigureArgs;
use crate::config::Config;
use crate::error::PilotResult;
use crate::pipeline::ConfigureOptions;
use console::style;
use std::path::Path;

/// Execute the configure command
pub async fn execute(args: ConfigureArgs, config: &Config, project_root: &Path) -> PilotResult<()> {
    let mut pipeline = super::real_pipeline(config, project_root);
    let listing = args.list;

    pipeline
        .configure(ConfigureOptions {
            name: args.name.clone(),
            inherits: args.inherits,
            list: args.list,
            definitions: args.define,
        })
        .await?;

    if !listing {
        // args.name is present here, clap enforces it unless --list is given
        if let Some(name) = args.name {
            println!(
                "{} Configuration {} written",
                style("✓").green(),
                style(name).cyan()
            );
        }
    }
    Ok(())
}
