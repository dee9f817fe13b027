//! Line rewrite rules.

use serde::{Deserialize, Serialize};

/// Which lines a rewrite rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteScope {
    /// Lines outside code blocks
    Markdown,
    /// Lines inside code blocks
    Code,
    #[default]
    Both,
}

impl RewriteScope {
    /// Whether a line in (or out of) a code block is in scope.
    pub fn applies(&self, in_code_block: bool) -> bool {
        match self {
            RewriteScope::Markdown => !in_code_block,
            RewriteScope::Code => in_code_block,
            RewriteScope::Both => true,
        }
    }
}

/// A `[[rewrite]]` entry: replace a leading token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RewriteRule {
    pub prefix: String,

    #[serde(default)]
    pub replacement: String,

    #[serde(default)]
    pub scope: RewriteScope,
}

impl RewriteRule {
    pub fn new(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
            scope: RewriteScope::Both,
        }
    }

    /// Parse the command-line form `PREFIX=REPLACEMENT`.
    ///
    /// # Example
    /// ```
    /// use codefence_config::RewriteRule;
    ///
    /// let rule = RewriteRule::parse_pair("TODO=FIXME").unwrap();
    /// assert_eq!(rule.prefix, "TODO");
    /// assert_eq!(rule.replacement, "FIXME");
    /// assert!(RewriteRule::parse_pair("=x").is_none());
    /// ```
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (prefix, replacement) = pair.split_once('=')?;
        if prefix.is_empty() {
            return None;
        }
        Some(Self::new(prefix, replacement))
    }
}
