//! Generate command - run CMake to generate the build files

use crate::cli::args::GenerateArgs;
use crate::config::Config;
use crate::error::PilotResult;
use crate::pipeline::GenerateOptions;
use console::style;
use std::path::Path;
use std::time::Instant;

/// Execute the generate command
pub async fn execute(args: GenerateArgs, config: &Config, project_root: &Path) -> PilotResult<()> {
    let mut pipeline = super::real_pipeline(config, project_root);
    let start = Instant::now();

    let name = pipeline
        .generate(GenerateOptions {
            name: args.name,
            clean: args.clean,
        })
        .await?;

    println!(
        "Generating the build files for {} took {}",
        style(name).cyan(),
        super::format_elapsed(start.elapsed())
    );
    println!("{}", style("SUCCESS!").green().bold());
    Ok(())
}
