//! buildpilot - CMake pipeline driver
//!
//! CLI entry point that dispatches to subcommands.

use buildpilot::cli::{Cli, Commands};
use buildpilot::config::ConfigManager;
use buildpilot::error::{PilotError, PilotResult};
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // One diagnostic line on stdout, then a failing exit code
            println!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                println!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PilotResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("buildpilot=warn"),
        1 => EnvFilter::new("buildpilot=info"),
        _ => EnvFilter::new("buildpilot=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let project_root = match cli.project {
        Some(path) => path,
        None => std::env::current_dir()
            .map_err(|e| PilotError::io("getting current directory", e))?,
    };

    let config_manager = if let Some(path) = cli.config {
        ConfigManager::with_path(path)
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load(&project_root).await?;

    match cli.command {
        Commands::Init(args) => buildpilot::cli::commands::init(args, &config, &project_root).await,
        Commands::Configure(args) => {
            buildpilot::cli::commands::configure(args, &config, &project_root).await
        }
        Commands::Deps(args) => buildpilot::cli::commands::deps(args, &config, &project_root).await,
        Commands::Generate(args) => {
            buildpilot::cli::commands::generate(args, &config, &project_root).await
        }
        Commands::Build(args) => {
            buildpilot::cli::commands::build(args, &config, &project_root).await
        }
    }
}
