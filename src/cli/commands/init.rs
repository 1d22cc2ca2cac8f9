//! Init command - place the bootstrap scripts into the project root

use crate::cli::args::InitArgs;
use crate::config::Config;
use crate::error::PilotResult;
use crate::pipeline::InitOptions;
use console::style;
use std::path::Path;

/// Execute the init command
pub async fn execute(args: InitArgs, config: &Config, project_root: &Path) -> PilotResult<()> {
    let mut pipeline = super::real_pipeline(config, project_root);

    pipeline
        .init(InitOptions {
            template_dir: args.templates,
        })
        .await?;

    println!(
        "{} Project initialized at {}",
        style("✓").green(),
        project_root.display()
    );
    Ok(())
}
