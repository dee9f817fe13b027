//! Feature flags configuration.
//!
//! This module contains the `FeaturesConfig` struct which holds the
//! switches that shape how input is fed and how output is shown.

use serde::{Deserialize, Serialize};

/// Feature flags configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeaturesConfig {
    /// Re-chunk input into pieces of this many characters.
    /// Default: 0 (feed input as it is read)
    #[serde(default)]
    pub chunk_size: usize,

    /// Prefix code-block lines with an `[index:language]` gutter.
    /// Default: false
    #[serde(default)]
    pub annotate: bool,

    /// Expand leading tabs inside code blocks.
    /// Default: false
    #[serde(default)]
    pub expand_tabs: bool,

    /// Spaces per tab when expanding.
    /// Default: 4
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            chunk_size: 0,
            annotate: false,
            expand_tabs: false,
            tab_width: default_tab_width(),
        }
    }
}

impl FeaturesConfig {
    /// Merge another FeaturesConfig into this one.
    ///
    /// All fields are copied from `other`; TOML has no "unset" state for
    /// plain values.
    pub fn merge(&mut self, other: &FeaturesConfig) {
        self.chunk_size = other.chunk_size;
        self.annotate = other.annotate;
        self.expand_tabs = other.expand_tabs;
        self.tab_width = other.tab_width;
    }
}

fn default_tab_width() -> usize {
    4
}
