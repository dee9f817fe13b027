//! Codefence Rewriters
//!
//! Line rewriters that plug into the parser. A rewriter sees every
//! complete content line (never fence or marker lines) and may replace it
//! before it reaches the sink and the block body.
//!
//! # Rewriter Behavior
//!
//! - `matches` decides whether a line is rewritten; it is also asked about
//!   incomplete lines, which are held back while it returns `true`
//! - Rewriters in a [`RewriterChain`] run in registration order, each on
//!   the output of the previous one
//!
//! # Example
//!
//! ```
//! use codefence_parser::{FenceEvent, LineRewriter, StreamingFenceParser};
//! use codefence_plugin::RewriterChain;
//!
//! struct Shout;
//!
//! impl LineRewriter for Shout {
//!     fn matches(&self, _text: &str, in_code_block: bool) -> bool {
//!         !in_code_block
//!     }
//!
//!     fn rewrite(&self, line: &str, _in_code_block: bool) -> String {
//!         line.to_uppercase()
//!     }
//! }
//!
//! let mut chain = RewriterChain::new();
//! chain.register(Box::new(Shout));
//!
//! let mut parser = StreamingFenceParser::new(Vec::new()).with_rewriter(chain);
//! parser.process_chunk("hi\n");
//! let events = parser.finish();
//! assert!(matches!(&events[0], FenceEvent::Markdown { text, .. } if text == "HI\n"));
//! ```

pub mod builtin;

pub use builtin::{PrefixRewriter, TabExpander};

use codefence_config::Config;
use codefence_parser::LineRewriter;
use log::debug;

/// Rewriters applied one after another.
#[derive(Default)]
pub struct RewriterChain {
    rewriters: Vec<Box<dyn LineRewriter>>,
}

impl std::fmt::Debug for RewriterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RewriterChain")
            .field("len", &self.rewriters.len())
            .finish()
    }
}

impl RewriterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rewriter; it runs after those already registered.
    pub fn register(&mut self, rewriter: Box<dyn LineRewriter>) {
        self.rewriters.push(rewriter);
    }

    pub fn len(&self) -> usize {
        self.rewriters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewriters.is_empty()
    }
}

impl LineRewriter for RewriterChain {
    fn matches(&self, text: &str, in_code_block: bool) -> bool {
        self.rewriters
            .iter()
            .any(|r| r.matches(text, in_code_block))
    }

    fn rewrite(&self, line: &str, in_code_block: bool) -> String {
        let mut current = line.to_string();
        for rewriter in &self.rewriters {
            if rewriter.matches(&current, in_code_block) {
                current = rewriter.rewrite(&current, in_code_block);
            }
        }
        current
    }
}

/// Build the rewriters a configuration asks for.
///
/// Returns `None` when there is nothing to rewrite. Rules with an empty
/// prefix are skipped.
pub fn from_config(config: &Config) -> Option<RewriterChain> {
    let mut chain = RewriterChain::new();

    if config.features.expand_tabs {
        chain.register(Box::new(TabExpander::new(config.features.tab_width)));
    }

    for rule in &config.rewrite {
        if rule.prefix.is_empty() {
            debug!("Skipping rewrite rule with empty prefix");
            continue;
        }
        chain.register(Box::new(PrefixRewriter::new(
            rule.prefix.clone(),
            rule.replacement.clone(),
            rule.scope,
        )));
    }

    debug!("{} line rewriter(s) configured", chain.len());
    if chain.is_empty() {
        None
    } else {
        Some(chain)
    }
}
