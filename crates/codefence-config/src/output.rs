//! Where completed blocks go and how marker paths are resolved.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Block output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConfig {
    /// Directory completed blocks are written under. Empty disables writing.
    #[serde(default)]
    pub dir: String,

    /// Replace files that already exist.
    #[serde(default)]
    pub overwrite: bool,
}

impl OutputConfig {
    /// The output directory, if writing is enabled.
    pub fn dir(&self) -> Option<PathBuf> {
        if self.dir.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }

    pub fn merge(&mut self, other: &OutputConfig) {
        self.dir = other.dir.clone();
        self.overwrite = other.overwrite;
    }
}

/// Marker path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolverConfig {
    /// Directory relative marker paths are resolved against.
    /// Default: "."
    #[serde(default = "default_root")]
    pub root: String,

    /// Accept marker paths that leave the root.
    /// Default: false
    #[serde(default)]
    pub allow_outside_root: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            allow_outside_root: false,
        }
    }
}

impl ResolverConfig {
    pub fn root(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    pub fn merge(&mut self, other: &ResolverConfig) {
        self.root = other.root.clone();
        self.allow_outside_root = other.allow_outside_root;
    }
}

fn default_root() -> String {
    ".".to_string()
}
