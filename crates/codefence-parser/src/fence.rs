//! Fence recognition.

use codefence_core::FenceChar;
use regex::Regex;
use std::sync::LazyLock;

/// A run of 3+ backticks or tildes at line start, then an optional tag.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(`{3,}|~{3,})(\w*)").unwrap());

/// A fence line, split into its delimiter run and language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fence {
    /// Character the run is made of
    pub kind: FenceChar,
    /// The exact delimiter run
    pub token: String,
    /// Language tag written right after the run
    pub language: Option<String>,
}

impl Fence {
    /// Parse a line as a fence.
    ///
    /// # Example
    /// ```
    /// use codefence_parser::Fence;
    ///
    /// let fence = Fence::parse("```rust\n").unwrap();
    /// assert_eq!(fence.token, "```");
    /// assert_eq!(fence.language.as_deref(), Some("rust"));
    /// assert!(Fence::parse("  ```\n").is_none());
    /// ```
    pub fn parse(line: &str) -> Option<Self> {
        let caps = FENCE_RE.captures(line)?;
        let token = caps.get(1)?.as_str();
        let kind = FenceChar::from_char(token.chars().next()?)?;
        let language = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Some(Self {
            kind,
            token: token.to_string(),
            language,
        })
    }

    /// Whether this fence pairs with the fence that opened a block: same
    /// character and a run at least as long.
    pub fn pairs_with(&self, opener: &Fence) -> bool {
        self.kind == opener.kind && self.token.len() >= opener.token.len()
    }
}

/// Whether an incomplete line could still turn into a fence.
///
/// Only the first three characters are inspected: if they are all the same
/// backtick or tilde the line has to be seen whole.
pub fn might_be_fence(partial: &str) -> bool {
    let mut chars = partial.chars().take(3);
    match chars.next() {
        Some(first) if FenceChar::from_char(first).is_some() => chars.all(|c| c == first),
        _ => false,
    }
}
