//! Terminal echo and on-disk output of completed blocks.

use codefence_core::{CodeBlockInfo, CodefenceError, CompletedCodeBlock, Result};
use codefence_parser::FenceSink;
use crossterm::style::{style, Stylize};
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Sanitize a language tag for use as a file extension.
///
/// Keeps ASCII alphanumerics only, at most 10 of them, lowercased.
pub fn sanitize_extension(ext: &str) -> String {
    ext.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_lowercase()
}

/// What happened to one completed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub index: usize,
    pub language: Option<String>,
    pub lines: usize,
    /// Where the block was written, if it was
    pub written_to: Option<PathBuf>,
}

/// Writes completed blocks under an output directory.
#[derive(Debug, Clone)]
pub struct BlockWriter {
    out_dir: PathBuf,
    root: PathBuf,
    overwrite: bool,
    written: usize,
}

impl BlockWriter {
    /// `root` is the directory marker paths were resolved against.
    pub fn new(out_dir: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            root: root.into(),
            overwrite: false,
            written: 0,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Where a block goes: its resource relative to the output directory
    /// when the resource lies inside the root, otherwise a numbered file.
    pub fn target_for(&self, block: &CompletedCodeBlock) -> PathBuf {
        let relative = block
            .resource
            .as_deref()
            .and_then(|r| r.strip_prefix(&self.root).ok())
            .filter(|r| is_plain_relative(r));

        match relative {
            Some(relative) => self.out_dir.join(relative),
            None => {
                let ext = block
                    .language
                    .as_deref()
                    .map(sanitize_extension)
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "txt".to_string());
                self.out_dir
                    .join(format!("code_{:04}.{}", self.written % 10_000, ext))
            }
        }
    }

    /// Write `block`, returning where it went. Existing files are left
    /// alone unless overwriting is on.
    pub fn write(&mut self, block: &CompletedCodeBlock) -> Result<Option<PathBuf>> {
        let target = self.target_for(block);
        self.written += 1;

        if target.exists() && !self.overwrite {
            warn!("Not overwriting {}", target.display());
            return Ok(None);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &block.code).map_err(|e| {
            CodefenceError::Output(format!("writing {}: {}", target.display(), e))
        })?;

        debug!("Block {} written to {}", block.index, target.display());
        Ok(Some(target))
    }
}

/// A relative path with no `..`, `.` or root components.
fn is_plain_relative(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Sink that echoes markdown to a writer and records completed blocks.
///
/// Sink callbacks cannot fail, so the first error is kept and reported by
/// [`flush_output`](Self::flush_output); later output is dropped.
pub struct TerminalSink<W: Write> {
    out: W,
    annotate: bool,
    color: bool,
    at_line_start: bool,
    after_cr: bool,
    writer: Option<BlockWriter>,
    completed: Vec<BlockSummary>,
    error: Option<CodefenceError>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            annotate: false,
            color: false,
            at_line_start: true,
            after_cr: false,
            writer: None,
            completed: Vec::new(),
            error: None,
        }
    }

    /// Prefix code-block lines with a gutter, dimmed when `color` is set.
    pub fn annotate(mut self, annotate: bool, color: bool) -> Self {
        self.annotate = annotate;
        self.color = color;
        self
    }

    pub fn with_writer(mut self, writer: BlockWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn completed(&self) -> &[BlockSummary] {
        &self.completed
    }

    /// Flush the writer and surface the first error seen so far.
    pub fn flush_output(&mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consume the sink, returning the block summaries.
    pub fn into_completed(mut self) -> Result<Vec<BlockSummary>> {
        self.flush_output()?;
        Ok(self.completed)
    }

    fn write_markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>) -> std::io::Result<()> {
        let continues_crlf = self.after_cr && text.starts_with('\n');
        if let Some(info) = info.filter(|_| self.annotate) {
            if self.at_line_start && !continues_crlf {
                let gutter = gutter(info);
                if self.color {
                    write!(self.out, "{} ", style(&gutter).dim())?;
                } else {
                    write!(self.out, "{} ", gutter)?;
                }
            }
        }
        self.out.write_all(text.as_bytes())?;
        self.at_line_start = text.ends_with(['\n', '\r']);
        self.after_cr = text.ends_with('\r');
        Ok(())
    }
}

/// `[index:language]`, or `[index]` for untagged blocks.
pub fn gutter(info: &CodeBlockInfo) -> String {
    match &info.language {
        Some(language) => format!("[{}:{}]", info.index, language),
        None => format!("[{}]", info.index),
    }
}

impl<W: Write> FenceSink for TerminalSink<W> {
    fn markdown(&mut self, text: &str, info: Option<&CodeBlockInfo>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_markdown(text, info) {
            self.error = Some(e.into());
        }
    }

    fn code_block(&mut self, block: CompletedCodeBlock) {
        let written_to = match self.writer.as_mut() {
            Some(writer) => match writer.write(&block) {
                Ok(path) => path,
                Err(e) => {
                    if self.error.is_none() {
                        self.error = Some(e);
                    }
                    None
                }
            },
            None => None,
        };

        self.completed.push(BlockSummary {
            index: block.index,
            language: block.language,
            lines: block.code.lines().count(),
            written_to,
        });
    }
}
