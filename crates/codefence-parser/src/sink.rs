//! Collaborators injected into the parser.
//!
//! The parser talks to the outside world through three seams:
//! - [`FenceSink`] receives the annotated markdown stream and completed blocks
//! - [`PathResolver`] turns a marker path into a location
//! - [`LineRewriter`] optionally rewrites complete content lines

use codefence_core::{CodeBlockInfo, CompletedCodeBlock};
use std::path::PathBuf;

/// Receiver of everything the parser emits.
///
/// Calls arrive synchronously and in input order.
pub trait FenceSink {
    /// A line, or a fragment of a line, of markdown. `info` is set while a
    /// block is open, including for its opening and closing fence lines.
    fn markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>);

    /// A block closed by its matching fence.
    fn code_block(&mut self, block: CompletedCodeBlock);
}

/// One recorded sink call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceEvent {
    Markdown {
        text: String,
        info: Option<CodeBlockInfo>,
    },
    CodeBlock(CompletedCodeBlock),
}

impl FenceEvent {
    /// The completed block, if this is one.
    pub fn as_code_block(&self) -> Option<&CompletedCodeBlock> {
        match self {
            FenceEvent::CodeBlock(block) => Some(block),
            FenceEvent::Markdown { .. } => None,
        }
    }
}

/// Collecting sink: records every call.
impl FenceSink for Vec<FenceEvent> {
    fn markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>) {
        self.push(FenceEvent::Markdown {
            text: text.to_string(),
            info: info.cloned(),
        });
    }

    fn code_block(&mut self, block: CompletedCodeBlock) {
        self.push(FenceEvent::CodeBlock(block));
    }
}

/// A pair of callbacks: the markdown sink and the completed-block sink.
impl<M, B> FenceSink for (M, B)
where
    M: FnMut(&str, Option<&CodeBlockInfo>),
    B: FnMut(CompletedCodeBlock),
{
    fn markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>) {
        (self.0)(text, info)
    }

    fn code_block(&mut self, block: CompletedCodeBlock) {
        (self.1)(block)
    }
}

impl<S: FenceSink + ?Sized> FenceSink for &mut S {
    fn markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>) {
        (**self).markdown(text, info)
    }

    fn code_block(&mut self, block: CompletedCodeBlock) {
        (**self).code_block(block)
    }
}

/// Turns the path named by a file-path marker into a location.
///
/// Returning `None` leaves the block's resource unset; the block is still
/// completed normally.
pub trait PathResolver: Send {
    fn resolve(&self, path: &str) -> Option<PathBuf>;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> Option<PathBuf> + Send,
{
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        self(path)
    }
}

/// Resolver that declines every path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl PathResolver for NoResolver {
    fn resolve(&self, _path: &str) -> Option<PathBuf> {
        None
    }
}

/// Rewrites complete content lines.
///
/// `matches` is also asked about incomplete lines to decide whether they
/// may be emitted before the rest of the line arrives. An incomplete line
/// for which `matches` returns `false` is emitted unchanged, so an
/// implementation must return `true` for any text that could still grow
/// into a line it rewrites.
pub trait LineRewriter: Send {
    fn matches(&self, text: &str, in_code_block: bool) -> bool;

    fn rewrite(&self, line: &str, in_code_block: bool) -> String;
}

impl<T: LineRewriter + ?Sized> LineRewriter for Box<T> {
    fn matches(&self, text: &str, in_code_block: bool) -> bool {
        (**self).matches(text, in_code_block)
    }

    fn rewrite(&self, line: &str, in_code_block: bool) -> String {
        (**self).rewrite(line, in_code_block)
    }
}
