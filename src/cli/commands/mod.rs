//! CLI command implementations

pub mod build;
pub mod configure;
pub mod deps;
pub mod generate;
pub mod init;

pub use build::execute as build;
pub use configure::execute as configure;
pub use deps::execute as deps;
pub use generate::execute as generate;
pub use init::execute as init;

use crate::config::Config;
use crate::exec::ShellRunner;
use crate::fs::OsFileSystem;
use crate::layout::ProjectLayout;
use crate::pipeline::Pipeline;
use std::path::Path;
use std::time::Duration;

/// Build a pipeline over the real filesystem and real subprocesses
fn real_pipeline(config: &Config, project_root: &Path) -> Pipeline<OsFileSystem, ShellRunner> {
    let layout = ProjectLayout::new(project_root, &config.layout);
    Pipeline::new(layout, config.clone(), OsFileSystem::new(), ShellRunner::new())
}

/// Render an elapsed duration as `h:mm:ss or N s`
fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02} h:m:s or {total} s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_elapsed_renders_components() {
        assert_eq!(format_elapsed(Duration::from_secs(5)), "0:00:05 h:m:s or 5 s");
        assert_eq!(
            format_elapsed(Duration::from_secs(3725)),
            "1:02:05 h:m:s or 3725 s"
        );
    }
}
