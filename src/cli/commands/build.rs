//! Build command - invoke the build for a configuration

use crate::cli::args::BuildArgs;
use crate::config::Config;
use crate::error::PilotResult;
use crate::pipeline::BuildOptions;
use console::style;
use std::path::Path;
use std::time::Instant;

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config, project_root: &Path) -> PilotResult<()> {
    let mut pipeline = super::real_pipeline(config, project_root);
    let start = Instant::now();

    let name = pipeline
        .build(BuildOptions {
            name: args.name,
            target: args.target,
            build_type: args.build_type,
            clean: args.clean,
            cpus: args.cpus,
        })
        .await?;

    println!(
        "The build of {} took {}",
        style(name).cyan(),
        super::format_elapsed(start.elapsed())
    );
    println!("{}", style("SUCCESS!").green().bold());
    Ok(())
}
