//! Core types for codefence

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Annotation attached to every line emitted while a block is open.
///
/// `index` is assigned when the block opens and never changes. `resource`
/// starts unset and may be set exactly once, either from a file-path marker
/// or from an out-of-band report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockInfo {
    /// Position of the block in the stream (0-indexed)
    pub index: usize,
    /// Language tag from the opening fence
    pub language: Option<String>,
    /// Where the block's code belongs, once known
    pub resource: Option<PathBuf>,
}

impl CodeBlockInfo {
    /// Create info for a freshly opened block.
    pub fn new(index: usize, language: Option<String>) -> Self {
        Self {
            index,
            language,
            resource: None,
        }
    }

    /// Set the resource unless one is already set.
    ///
    /// Returns `true` if the resource was stored.
    pub fn set_resource_once(&mut self, resource: PathBuf) -> bool {
        if self.resource.is_some() {
            return false;
        }
        self.resource = Some(resource);
        true
    }
}

/// A fenced block that was closed by its matching fence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletedCodeBlock {
    /// Same index the block's lines were annotated with
    pub index: usize,
    /// Body lines in order, terminators included, fences and marker excluded
    pub code: String,
    /// Language tag from the opening fence
    pub language: Option<String>,
    /// Resolved location, if any
    pub resource: Option<PathBuf>,
    /// Markdown emitted since the previous block closed
    pub markdown_before_block: String,
}
