//! Error types for buildpilot
//!
//! All modules use `PilotResult<T>` as their return type. The variants fall
//! into three groups that callers can branch on: path-resolver precondition
//! violations, pipeline preconditions, and external command failures.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpilot operations
pub type PilotResult<T> = Result<T, PilotError>;

/// All errors that can occur in buildpilot
#[derive(Error, Debug)]
pub enum PilotError {
    // Filesystem precondition violations
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Parent directory of {0} does not exist")]
    MissingParent(PathBuf),

    #[error("Path already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Path conflict at {path}: {reason}")]
    PathConflict { path: PathBuf, reason: String },

    #[error("Source and destination are the same path: {0}")]
    SamePathCopy(PathBuf),

    // Pipeline preconditions
    #[error("A configuration name is required for this step")]
    ConfigNameRequired,

    #[error("Invalid definition {0}: missing '=' character")]
    InvalidDefinition(String),

    #[error("Configuration {0} does not exist")]
    ConfigurationNotFound(String),

    #[error("No configuration file found. Specify a configuration name or run: buildpilot configure <name>")]
    NoConfigurations,

    #[error("No generated build files found for any configuration")]
    NoCacheFile,

    #[error("Conan profile not found: {0}")]
    ProfileNotFound(PathBuf),

    #[error("Project was initialized with buildpilot {stamped}, which is incompatible with version {current}")]
    StampIncompatible { stamped: String, current: String },

    #[error("Invalid version stamp {value}: {reason}")]
    StampInvalid { value: String, reason: String },

    // Tool configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Process errors
    #[error("Failed to start command: {command}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command failed with exit code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PilotError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create a path conflict error
    pub fn conflict(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::PathConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error is a violated precondition of the filesystem layer
    pub fn is_fs_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::NotADirectory(_)
                | Self::NotAFile(_)
                | Self::MissingParent(_)
                | Self::AlreadyExists(_)
                | Self::PathConflict { .. }
                | Self::SamePathCopy(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigurationNotFound(_) => Some("Run: buildpilot configure <name>"),
            Self::NoConfigurations => Some("Run: buildpilot configure <name>"),
            Self::NoCacheFile => Some("Run: buildpilot generate <name>"),
            Self::StampIncompatible { .. } => {
                Some("Run: buildpilot init (updates the copied scripts)")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PilotError::ConfigurationNotFound("MyConfig".to_string());
        assert!(err.to_string().contains("MyConfig"));
    }

    #[test]
    fn error_hint() {
        let err = PilotError::NoCacheFile;
        assert_eq!(err.hint(), Some("Run: buildpilot generate <name>"));
        assert_eq!(PilotError::NotFound(PathBuf::from("/missing")).hint(), None);
    }

    #[test]
    fn error_fs_precondition() {
        assert!(PilotError::MissingParent(PathBuf::from("/a/b")).is_fs_precondition());
        assert!(!PilotError::NoConfigurations.is_fs_precondition());
    }
}
