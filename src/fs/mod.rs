//! Filesystem abstraction
//!
//! Provides a trait for the filesystem operations used by the pipeline so the
//! orchestration logic can be tested against [`MemoryFileSystem`] without
//! touching a real disk. [`OsFileSystem`] is the implementation used by the
//! CLI and enforces the same preconditions as the fake.

pub mod memory;

pub use memory::MemoryFileSystem;

use crate::error::{PilotError, PilotResult};
use std::path::Path;

/// Abstract filesystem interface
///
/// Paths may be written with either separator; implementations normalize
/// backslashes to `/` before resolving, so `a\b` and `a/b` name the same node.
/// Existence queries return `false` for unresolvable paths, never an error.
pub trait FileSystem {
    /// Check whether a node exists at the path
    fn exists(&self, path: &Path) -> bool;

    /// Check whether the path resolves to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Check whether the path resolves to a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List the child names of a directory in insertion order
    ///
    /// Fails when the path does not resolve to an existing directory.
    fn list_dir(&self, path: &Path) -> PilotResult<Vec<String>>;

    /// Create a single directory; the parent must already exist and no node
    /// of any kind may exist at the path
    fn make_dir(&mut self, path: &Path) -> PilotResult<()>;

    /// Create every missing directory along the path; existing segments are
    /// accepted unless one of them is a file
    fn make_dirs(&mut self, path: &Path) -> PilotResult<()>;

    /// Create a file with the given content, creating missing parent
    /// directories; an existing file at the path has its content replaced,
    /// an existing directory is a conflict
    fn write_file(&mut self, path: &Path, content: &str) -> PilotResult<()>;

    /// Read the content of an existing file
    fn read_file(&self, path: &Path) -> PilotResult<String>;

    /// Remove a directory and its entire subtree
    fn remove_tree(&mut self, path: &Path) -> PilotResult<()>;

    /// Copy a file; the destination's parent directory must already exist
    /// and an existing destination node must be a file (it is overwritten)
    fn copy_file(&mut self, from: &Path, to: &Path) -> PilotResult<()>;
}

/// Filesystem implementation backed by `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Create a new OS filesystem handle
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> PilotResult<Vec<String>> {
        if !path.exists() {
            return Err(PilotError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(PilotError::NotADirectory(path.to_path_buf()));
        }

        let entries = std::fs::read_dir(path)
            .map_err(|e| PilotError::io(format!("listing {}", path.display()), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| PilotError::io(format!("listing {}", path.display()), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn make_dir(&mut self, path: &Path) -> PilotResult<()> {
        if path.exists() {
            return Err(PilotError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(PilotError::MissingParent(path.to_path_buf()));
            }
        }
        std::fs::create_dir(path)
            .map_err(|e| PilotError::io(format!("creating directory {}", path.display()), e))
    }

    fn make_dirs(&mut self, path: &Path) -> PilotResult<()> {
        if path.is_file() {
            return Err(PilotError::conflict(path, "a file exists at this path"));
        }
        std::fs::create_dir_all(path)
            .map_err(|e| PilotError::io(format!("creating directories {}", path.display()), e))
    }

    fn write_file(&mut self, path: &Path, content: &str) -> PilotResult<()> {
        if path.is_dir() {
            return Err(PilotError::conflict(path, "a directory exists at this path"));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PilotError::io(format!("creating directories {}", parent.display()), e)
                })?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| PilotError::io(format!("writing {}", path.display()), e))
    }

    fn read_file(&self, path: &Path) -> PilotResult<String> {
        if !path.exists() {
            return Err(PilotError::NotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(PilotError::NotAFile(path.to_path_buf()));
        }
        std::fs::read_to_string(path)
            .map_err(|e| PilotError::io(format!("reading {}", path.display()), e))
    }

    fn remove_tree(&mut self, path: &Path) -> PilotResult<()> {
        if !path.exists() {
            return Err(PilotError::NotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(PilotError::NotADirectory(path.to_path_buf()));
        }
        std::fs::remove_dir_all(path)
            .map_err(|e| PilotError::io(format!("removing {}", path.display()), e))
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> PilotResult<()> {
        if from == to {
            return Err(PilotError::SamePathCopy(from.to_path_buf()));
        }
        if !from.exists() {
            return Err(PilotError::NotFound(from.to_path_buf()));
        }
        if !from.is_file() {
            return Err(PilotError::NotAFile(from.to_path_buf()));
        }
        if to.is_dir() {
            return Err(PilotError::conflict(to, "a directory exists at this path"));
        }
        match to.parent() {
            Some(parent) if parent.as_os_str().is_empty() || parent.exists() => {}
            _ => return Err(PilotError::MissingParent(to.to_path_buf())),
        }
        std::fs::copy(from, to).map_err(|e| {
            PilotError::io(
                format!("copying {} to {}", from.display(), to.display()),
                e,
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn os_fs_write_read_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut fs = OsFileSystem::new();
        let file = temp.path().join("sub/dir/file.txt");

        fs.write_file(&file, "content").unwrap();

        assert!(fs.is_file(&file));
        assert!(fs.is_dir(&temp.path().join("sub/dir")));
        assert_eq!(fs.read_file(&file).unwrap(), "content");
    }

    #[test]
    fn os_fs_make_dir_requires_parent() {
        let temp = TempDir::new().unwrap();
        let mut fs = OsFileSystem::new();

        let err = fs.make_dir(&temp.path().join("a/b")).unwrap_err();
        assert!(matches!(err, PilotError::MissingParent(_)));

        fs.make_dir(&temp.path().join("a")).unwrap();
        let err = fs.make_dir(&temp.path().join("a")).unwrap_err();
        assert!(matches!(err, PilotError::AlreadyExists(_)));
    }

    #[test]
    fn os_fs_copy_file_preconditions() {
        let temp = TempDir::new().unwrap();
        let mut fs = OsFileSystem::new();
        let src = temp.path().join("src.txt");
        fs.write_file(&src, "x").unwrap();

        let err = fs.copy_file(&src, &src).unwrap_err();
        assert!(matches!(err, PilotError::SamePathCopy(_)));

        let err = fs
            .copy_file(&src, &temp.path().join("missing/dst.txt"))
            .unwrap_err();
        assert!(matches!(err, PilotError::MissingParent(_)));

        fs.copy_file(&src, &temp.path().join("dst.txt")).unwrap();
        assert_eq!(fs.read_file(&temp.path().join("dst.txt")).unwrap(), "x");
    }

    #[test]
    fn os_fs_remove_tree_rejects_files() {
        let temp = TempDir::new().unwrap();
        let mut fs = OsFileSystem::new();
        let file = temp.path().join("f.txt");
        fs.write_file(&file, "x").unwrap();

        let err = fs.remove_tree(&file).unwrap_err();
        assert!(matches!(err, PilotError::NotADirectory(_)));

        fs.make_dirs(&temp.path().join("d/e")).unwrap();
        fs.remove_tree(&temp.path().join("d")).unwrap();
        assert!(!fs.exists(&temp.path().join("d")));
    }
}
