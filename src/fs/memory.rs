//! In-memory filesystem fake
//!
//! Models a small project tree as named nodes so pipeline tests run without
//! disk I/O. Each instance owns its own root, so independent fakes can
//! coexist in parallel test runs. Sibling names are unique and only
//! directories carry children; resolution is a segment-by-segment linear
//! child search, which is fine for the small trees used in tests.

use crate::error::{PilotError, PilotResult};
use crate::fs::FileSystem;
use std::path::Path;

/// A node in the fake filesystem tree
#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Dir(Vec<Node>),
    File(String),
}

impl Node {
    fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Dir(Vec::new()),
        }
    }

    fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File(content.into()),
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir(_))
    }

    fn children(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Dir(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children()?.iter().find(|c| c.name == name)
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.children()?.iter().position(|c| c.name == name)
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::dir("")
    }
}

/// Filesystem implementation that keeps all nodes in memory
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    root: Node,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that a file exists at the path with exactly this content
    pub fn has_file(&self, path: &Path, content: &str) -> bool {
        match self.resolve(&segments(path)) {
            Some(Node {
                kind: NodeKind::File(stored),
                ..
            }) => stored == content,
            _ => false,
        }
    }

    fn resolve(&self, segs: &[String]) -> Option<&Node> {
        let mut node = &self.root;
        for seg in segs {
            node = node.child(seg)?;
        }
        Some(node)
    }

    fn resolve_mut(&mut self, segs: &[String]) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for seg in segs {
            let idx = node.child_index(seg)?;
            node = match &mut node.kind {
                NodeKind::Dir(children) => &mut children[idx],
                NodeKind::File(_) => return None,
            };
        }
        Some(node)
    }

    /// Walk the segments creating missing directories, returning the final
    /// directory node. A segment resolving to a file is a conflict.
    fn ensure_dirs<'a>(&'a mut self, segs: &[String], full: &Path) -> PilotResult<&'a mut Node> {
        let mut node = &mut self.root;
        for seg in segs {
            let idx = match node.child_index(seg) {
                Some(idx) => idx,
                None => {
                    let children = match &mut node.kind {
                        NodeKind::Dir(children) => children,
                        NodeKind::File(_) => {
                            return Err(PilotError::conflict(full, "a file exists at this path"));
                        }
                    };
                    children.push(Node::dir(seg.clone()));
                    children.len() - 1
                }
            };
            node = match &mut node.kind {
                NodeKind::Dir(children) => &mut children[idx],
                NodeKind::File(_) => unreachable!("child_index returned Some for a file node"),
            };
            if !node.is_dir() {
                return Err(PilotError::conflict(full, "a file exists at this path"));
            }
        }
        Ok(node)
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(&segments(path)).is_some()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.resolve(&segments(path))
            .map(|n| !n.is_dir())
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(&segments(path))
            .map(Node::is_dir)
            .unwrap_or(false)
    }

    fn list_dir(&self, path: &Path) -> PilotResult<Vec<String>> {
        match self.resolve(&segments(path)) {
            None => Err(PilotError::NotFound(path.to_path_buf())),
            Some(node) => match node.children() {
                Some(children) => Ok(children.iter().map(|c| c.name.clone()).collect()),
                None => Err(PilotError::NotADirectory(path.to_path_buf())),
            },
        }
    }

    fn make_dir(&mut self, path: &Path) -> PilotResult<()> {
        let segs = segments(path);
        if self.resolve(&segs).is_some() {
            return Err(PilotError::AlreadyExists(path.to_path_buf()));
        }
        // segs is non-empty here since the root always exists
        let (parent, name) = split_last(&segs);
        match self.resolve_mut(parent) {
            Some(node) if node.is_dir() => {
                match &mut node.kind {
                    NodeKind::Dir(children) => children.push(Node::dir(name)),
                    NodeKind::File(_) => unreachable!("is_dir checked above"),
                }
                Ok(())
            }
            _ => Err(PilotError::MissingParent(path.to_path_buf())),
        }
    }

    fn make_dirs(&mut self, path: &Path) -> PilotResult<()> {
        let segs = segments(path);
        self.ensure_dirs(&segs, path)?;
        Ok(())
    }

    fn write_file(&mut self, path: &Path, content: &str) -> PilotResult<()> {
        let segs = segments(path);
        if segs.is_empty() {
            return Err(PilotError::conflict(path, "a directory exists at this path"));
        }
        let (parent, name) = split_last(&segs);
        let dir = self.ensure_dirs(parent, path)?;
        let children = match &mut dir.kind {
            NodeKind::Dir(children) => children,
            NodeKind::File(_) => unreachable!("ensure_dirs returns directories"),
        };
        match children.iter_mut().find(|c| c.name == name) {
            Some(Node {
                kind: NodeKind::File(stored),
                ..
            }) => {
                // Overwrite in place, keeping the node's position
                *stored = content.to_string();
                Ok(())
            }
            Some(_) => Err(PilotError::conflict(path, "a directory exists at this path")),
            None => {
                children.push(Node::file(name, content));
                Ok(())
            }
        }
    }

    fn read_file(&self, path: &Path) -> PilotResult<String> {
        match self.resolve(&segments(path)) {
            None => Err(PilotError::NotFound(path.to_path_buf())),
            Some(Node {
                kind: NodeKind::File(content),
                ..
            }) => Ok(content.clone()),
            Some(_) => Err(PilotError::NotAFile(path.to_path_buf())),
        }
    }

    fn remove_tree(&mut self, path: &Path) -> PilotResult<()> {
        let segs = segments(path);
        match self.resolve(&segs) {
            None => return Err(PilotError::NotFound(path.to_path_buf())),
            Some(node) if !node.is_dir() => {
                return Err(PilotError::NotADirectory(path.to_path_buf()));
            }
            Some(_) => {}
        }
        if segs.is_empty() {
            return Err(PilotError::conflict(path, "cannot remove the root"));
        }
        let (parent, name) = split_last(&segs);
        if let Some(node) = self.resolve_mut(parent) {
            if let NodeKind::Dir(children) = &mut node.kind {
                children.retain(|c| c.name != name);
            }
        }
        Ok(())
    }

    fn copy_file(&mut self, from: &Path, to: &Path) -> PilotResult<()> {
        let from_segs = segments(from);
        let to_segs = segments(to);
        if from_segs == to_segs {
            return Err(PilotError::SamePathCopy(from.to_path_buf()));
        }
        if to_segs.is_empty() {
            return Err(PilotError::conflict(to, "a directory exists at this path"));
        }

        let content = match self.resolve(&from_segs) {
            None => return Err(PilotError::NotFound(from.to_path_buf())),
            Some(Node {
                kind: NodeKind::File(content),
                ..
            }) => content.clone(),
            Some(_) => return Err(PilotError::NotAFile(from.to_path_buf())),
        };

        let (parent, name) = split_last(&to_segs);
        let dir = match self.resolve_mut(parent) {
            Some(node) if node.is_dir() => node,
            _ => return Err(PilotError::MissingParent(to.to_path_buf())),
        };
        let children = match &mut dir.kind {
            NodeKind::Dir(children) => children,
            NodeKind::File(_) => unreachable!("is_dir checked above"),
        };
        match children.iter_mut().find(|c| c.name == name) {
            Some(Node {
                kind: NodeKind::File(stored),
                ..
            }) => {
                *stored = content;
                Ok(())
            }
            Some(_) => Err(PilotError::conflict(to, "a directory exists at this path")),
            None => {
                children.push(Node::file(name, content));
                Ok(())
            }
        }
    }
}

/// Split a path into segments, normalizing backslash separators and dropping
/// empty segments from leading, trailing or doubled separators
fn segments(path: &Path) -> Vec<String> {
    path.to_string_lossy()
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_last(segs: &[String]) -> (&[String], &str) {
    let n = segs.len();
    (&segs[..n - 1], &segs[n - 1])
}
