//! Resolving marker paths against a workspace root.

use crate::sink::PathResolver;
use codefence_core::{CodefenceError, Result};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// Resolves marker paths relative to a root directory.
///
/// Relative paths are joined onto the root, `.` and `..` are folded
/// lexically (the file system is never consulted) and, unless allowed,
/// anything that ends up outside the root is refused.
#[derive(Debug, Clone)]
pub struct WorkspaceResolver {
    root: PathBuf,
    allow_outside_root: bool,
}

impl WorkspaceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root: normalize(&root),
            allow_outside_root: false,
        }
    }

    /// Accept locations outside the root.
    pub fn allow_outside_root(mut self, allow: bool) -> Self {
        self.allow_outside_root = allow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a marker path, explaining why when it is refused.
    pub fn resolve_path(&self, path: &str) -> Result<PathBuf> {
        let cleaned = clean_marker_path(path);
        if cleaned.is_empty() {
            return Err(CodefenceError::Resolve(format!("empty path in {path:?}")));
        }

        let candidate = Path::new(cleaned);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };
        let resolved = normalize(&joined);

        if !self.allow_outside_root && !resolved.starts_with(&self.root) {
            return Err(CodefenceError::Resolve(format!(
                "{} is outside {}",
                resolved.display(),
                self.root.display()
            )));
        }
        Ok(resolved)
    }
}

impl PathResolver for WorkspaceResolver {
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        match self.resolve_path(path) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                debug!("Not resolving marker path: {}", e);
                None
            }
        }
    }
}

/// Drop the decoration models put around marker paths.
fn clean_marker_path(path: &str) -> &str {
    let path = path.trim().trim_matches(['`', '"', '\'']);
    path.strip_prefix("file://").unwrap_or(path)
}

/// Fold `.` and `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
