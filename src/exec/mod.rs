//! External command execution
//!
//! The pipeline only ever talks to CMake and Conan through command lines and
//! their exit codes (plus one captured stdout for generator introspection).
//! [`CommandRunner`] is the seam that lets tests replace real subprocesses
//! with a scripted fake.

use crate::error::{PilotError, PilotResult};
use async_trait::async_trait;
use futures_util::future::join_all;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;
use tracing::debug;

/// A program invocation as a program name plus argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Create a command line from a program name and arguments
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of one command execution
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Abstract command execution interface
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command with inherited stdio, failing on a non-zero exit code
    async fn run(&self, command: &CommandLine, cwd: &Path) -> PilotResult<()>;

    /// Run several commands concurrently with captured output, waiting for
    /// all of them before returning. Spawn failures are errors; non-zero
    /// exits are reported through the captured exit codes.
    async fn capture_all(
        &self,
        commands: &[CommandLine],
        cwd: &Path,
    ) -> PilotResult<Vec<CapturedOutput>>;

    /// Number of usable CPU cores
    fn cpu_count(&self) -> usize;
}

/// Command runner that spawns real OS processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a new shell runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &CommandLine, cwd: &Path) -> PilotResult<()> {
        debug!("Executing in {}: {}", cwd.display(), command);

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| PilotError::spawn(command.to_string(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(PilotError::CommandFailed {
                command: command.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    async fn capture_all(
        &self,
        commands: &[CommandLine],
        cwd: &Path,
    ) -> PilotResult<Vec<CapturedOutput>> {
        let futures = commands.iter().map(|command| async move {
            debug!("Capturing in {}: {}", cwd.display(), command);

            let output = Command::new(&command.program)
                .args(&command.args)
                .current_dir(cwd)
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .map_err(|e| PilotError::spawn(command.to_string(), e))?;

            Ok(CapturedOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        });

        join_all(futures).await.into_iter().collect()
    }

    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Command runner fake that records invocations and replays queued outputs
///
/// `run` always succeeds unless a failure is queued with [`fail_next_runs`];
/// `capture_all` pops one queued output batch per call.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    state: Mutex<ScriptedState>,
    cpu_count: usize,
}

#[derive(Debug, Default)]
struct ScriptedState {
    executed: Vec<(PathBuf, CommandLine)>,
    captured_batches: Vec<Vec<CapturedOutput>>,
    failures_remaining: usize,
}

impl ScriptedRunner {
    /// Create a scripted runner reporting the given core count
    pub fn new(cpu_count: usize) -> Self {
        Self {
            state: Mutex::new(ScriptedState::default()),
            cpu_count,
        }
    }

    /// Queue one batch of outputs for the next `capture_all` call
    pub fn push_captured(&self, batch: Vec<CapturedOutput>) {
        self.state.lock().unwrap().captured_batches.push(batch);
    }

    /// Make the next `n` calls to `run` fail with a non-zero exit code
    pub fn fail_next_runs(&self, n: usize) {
        self.state.lock().unwrap().failures_remaining = n;
    }

    /// All commands seen so far, in execution order
    pub fn executed(&self) -> Vec<(PathBuf, CommandLine)> {
        self.state.lock().unwrap().executed.clone()
    }

    /// Rendered command strings, convenient for assertions
    pub fn executed_strings(&self) -> Vec<String> {
        self.executed()
            .into_iter()
            .map(|(_, cmd)| cmd.to_string())
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandLine, cwd: &Path) -> PilotResult<()> {
        let mut state = self.state.lock().unwrap();
        state.executed.push((cwd.to_path_buf(), command.clone()));
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(PilotError::CommandFailed {
                command: command.to_string(),
                code: 1,
            });
        }
        Ok(())
    }

    async fn capture_all(
        &self,
        commands: &[CommandLine],
        cwd: &Path,
    ) -> PilotResult<Vec<CapturedOutput>> {
        let mut state = self.state.lock().unwrap();
        for command in commands {
            state.executed.push((cwd.to_path_buf(), command.clone()));
        }
        if state.captured_batches.is_empty() {
            // Default: every command succeeded with empty output
            return Ok(commands.iter().map(|_| CapturedOutput::default()).collect());
        }
        Ok(state.captured_batches.remove(0))
    }

    fn cpu_count(&self) -> usize {
        self.cpu_count
    }
}
