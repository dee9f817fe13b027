//! Core enums for the streaming fence state machine.

use serde::{Deserialize, Serialize};

/// Where the parser currently stands relative to fenced code blocks.
///
/// Exactly one state is active at a time. Every state other than
/// [`ParseState::OutsideBlock`] implies that a block is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParseState {
    /// No block is open
    #[default]
    OutsideBlock,
    /// An opening fence was just seen; the next line decides whether it is
    /// a file-path marker
    AfterFenceLine,
    /// A file-path marker was just consumed; one blank line may follow
    AfterPathMarkerLine,
    /// Inside a fenced block, accumulating code
    InsideBlock,
}

impl ParseState {
    /// Whether a block is open in this state.
    pub fn in_block(&self) -> bool {
        !matches!(self, ParseState::OutsideBlock)
    }

    /// Whether the next line needs to be seen whole before anything is emitted.
    pub fn needs_full_line(&self) -> bool {
        matches!(
            self,
            ParseState::AfterFenceLine | ParseState::AfterPathMarkerLine
        )
    }
}

impl std::fmt::Display for ParseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseState::OutsideBlock => write!(f, "outside"),
            ParseState::AfterFenceLine => write!(f, "after-fence"),
            ParseState::AfterPathMarkerLine => write!(f, "after-marker"),
            ParseState::InsideBlock => write!(f, "inside"),
        }
    }
}

/// The character a fence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FenceChar {
    /// ```
    Backtick,
    /// ~~~
    Tilde,
}

impl FenceChar {
    /// Classify a character, if it can build a fence.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceChar::Backtick),
            '~' => Some(FenceChar::Tilde),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            FenceChar::Backtick => '`',
            FenceChar::Tilde => '~',
        }
    }
}

impl std::fmt::Display for FenceChar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FenceChar::Backtick => write!(f, "backtick"),
            FenceChar::Tilde => write!(f, "tilde"),
        }
    }
}
