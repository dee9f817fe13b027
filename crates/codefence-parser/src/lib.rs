//! Codefence Parser
//!
//! A streaming extractor for fenced code blocks in markdown produced by a
//! language model. Text arrives as arbitrary fragments; the parser rebuilds
//! lines, tracks fences (including same-character nested fences), detects
//! `filepath:` marker comments, forwards every line to a sink annotated with
//! the block it belongs to, and hands over each block once it closes.
//!
//! # Overview
//!
//! Incomplete lines are held back only while they could still change a
//! decision (they might become a fence, a marker, or a rewritten line).
//! Everything else is forwarded as soon as it arrives, so a caller feeding
//! one character at a time still sees output immediately.
//!
//! # Example
//!
//! ```
//! use codefence_parser::{FenceEvent, StreamingFenceParser};
//!
//! let mut parser = StreamingFenceParser::new(Vec::new());
//! for chunk in ["hel", "lo\n``", "`ts\nconsole.log(1);\n", "```"] {
//!     parser.process_chunk(chunk);
//! }
//! let events = parser.finish();
//!
//! let blocks: Vec<_> = events.iter().filter_map(FenceEvent::as_code_block).collect();
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].code, "console.log(1);\n");
//! assert_eq!(blocks[0].markdown_before_block, "hello\n");
//! ```

pub mod fence;
mod lines;
pub mod resolve;
pub mod sink;

pub use fence::{might_be_fence, Fence};
pub use lines::{split_lines, trim_terminator};
pub use resolve::WorkspaceResolver;
pub use sink::{FenceEvent, FenceSink, LineRewriter, NoResolver, PathResolver};

use codefence_core::{CodeBlockInfo, CompletedCodeBlock, ParseState};
use codefence_syntax::FilepathMarker;
use lines::{is_blank, line_end, Carry};
use log::{debug, trace};
use std::path::PathBuf;

// =============================================================================
// Types
// =============================================================================

/// The block currently open.
#[derive(Debug)]
struct PendingBlock {
    info: CodeBlockInfo,
    /// Fence that opened the block
    fence: Fence,
    /// Opening fence line, held until the marker decision is made
    first_line: Option<String>,
    /// Unmatched same-character fences, counting the opener
    depth: usize,
    /// Marker pattern for the block's language
    marker: Option<&'static FilepathMarker>,
}

// =============================================================================
// Parser
// =============================================================================

/// Streaming fenced-code-block extractor.
///
/// Feed it with [`process_chunk`](Self::process_chunk) and call
/// [`flush`](Self::flush) (or [`finish`](Self::finish)) once the stream ends.
pub struct StreamingFenceParser<S: FenceSink> {
    sink: S,
    resolver: Box<dyn PathResolver>,
    rewriter: Option<Box<dyn LineRewriter>>,
    state: ParseState,
    block: Option<PendingBlock>,
    carry: Carry,
    next_index: usize,
    /// Body of the open block
    code: String,
    /// Markdown emitted since the last block closed
    markdown_before: String,
}

impl<S: FenceSink> std::fmt::Debug for StreamingFenceParser<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingFenceParser")
            .field("state", &self.state)
            .field("block", &self.block)
            .field("carry", &self.carry)
            .field("next_index", &self.next_index)
            .field("has_rewriter", &self.rewriter.is_some())
            .finish()
    }
}

impl<S: FenceSink> StreamingFenceParser<S> {
    /// Create a parser that never resolves marker paths and rewrites nothing.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            resolver: Box::new(NoResolver),
            rewriter: None,
            state: ParseState::OutsideBlock,
            block: None,
            carry: Carry::Empty,
            next_index: 0,
            code: String::new(),
            markdown_before: String::new(),
        }
    }

    /// Use `resolver` for paths named by file-path markers.
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Rewrite content lines with `rewriter`.
    pub fn with_rewriter(mut self, rewriter: impl LineRewriter + 'static) -> Self {
        self.rewriter = Some(Box::new(rewriter));
        self
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Annotation of the open block, if any.
    pub fn current_block(&self) -> Option<&CodeBlockInfo> {
        self.block.as_ref().map(|b| &b.info)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Feed the next fragment of the stream.
    pub fn process_chunk(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut rest = text;

        match std::mem::take(&mut self.carry) {
            Carry::Empty => {}
            Carry::Continuing { after_cr } => match line_end(rest, after_cr) {
                Some(end) => {
                    let (head, tail) = rest.split_at(end);
                    if !head.is_empty() {
                        self.emit_fragment(head);
                    }
                    rest = tail;
                }
                None => {
                    self.emit_fragment(rest);
                    self.carry = Carry::Continuing {
                        after_cr: rest.ends_with('\r'),
                    };
                    return;
                }
            },
            Carry::Buffered(mut partial) => {
                match line_end(rest, partial.ends_with('\r')) {
                    Some(end) => {
                        partial.push_str(&rest[..end]);
                        rest = &rest[end..];
                        self.process_line(&partial, true);
                    }
                    None => {
                        partial.push_str(rest);
                        self.hold_or_emit(partial);
                        return;
                    }
                }
            }
        }

        while !rest.is_empty() {
            match line_end(rest, false) {
                Some(end) => {
                    let (line, tail) = rest.split_at(end);
                    self.process_line(line, true);
                    rest = tail;
                }
                None => {
                    self.hold_or_emit(rest.to_string());
                    break;
                }
            }
        }
    }

    /// Record a location learned by other means for the open block.
    ///
    /// Ignored when no block is open or the block already has a resource.
    pub fn report_resolved_path(&mut self, location: PathBuf) {
        match self.block.as_mut() {
            Some(block) => {
                let index = block.info.index;
                if block.info.set_resource_once(location) {
                    debug!("Block {} resource reported out of band", index);
                }
            }
            None => trace!("Resolved path reported with no open block"),
        }
    }

    /// Drain everything held back at end of stream.
    ///
    /// A buffered incomplete line is processed as a complete one. If the
    /// stream ended right after an opening fence, that fence line is
    /// emitted; the block stays unterminated and is never completed.
    pub fn flush(&mut self) {
        if let Carry::Buffered(partial) = std::mem::take(&mut self.carry) {
            self.process_line(&partial, true);
        }
        if self.state == ParseState::AfterFenceLine {
            self.state = ParseState::InsideBlock;
            self.emit_first_line();
        }
        if let Some(block) = &self.block {
            debug!("Stream ended inside block {}", block.info.index);
        }
    }

    /// Flush and hand back the sink.
    pub fn finish(mut self) -> S {
        self.flush();
        self.sink
    }

    /// Start a fresh stream, keeping the sink and collaborators.
    ///
    /// Block indices start again at 0.
    pub fn reset(&mut self) {
        self.state = ParseState::OutsideBlock;
        self.block = None;
        self.carry = Carry::Empty;
        self.next_index = 0;
        self.code.clear();
        self.markdown_before.clear();
    }

    // =========================================================================
    // Line handling
    // =========================================================================

    /// Buffer an incomplete line, or emit it now if nothing about it can
    /// change once the rest arrives.
    fn hold_or_emit(&mut self, partial: String) {
        if partial.is_empty() {
            return;
        }
        if self.can_emit_early(&partial) {
            trace!("Emitting partial line early ({} bytes)", partial.len());
            self.process_line(&partial, false);
            self.carry = Carry::Continuing {
                after_cr: partial.ends_with('\r'),
            };
        } else {
            self.carry = Carry::Buffered(partial);
        }
    }

    fn can_emit_early(&self, partial: &str) -> bool {
        if self.state.needs_full_line() || might_be_fence(partial) {
            return false;
        }
        let in_code = self.block.is_some();
        !self
            .rewriter
            .as_ref()
            .is_some_and(|r| r.matches(partial, in_code))
    }

    /// Run one line through the state machine. `complete` is false for a
    /// partial line emitted early; such a line is never a fence or marker
    /// and is never rewritten.
    fn process_line(&mut self, line: &str, complete: bool) {
        match self.state {
            ParseState::AfterFenceLine => {
                if self.try_consume_marker(line) {
                    return;
                }
                self.state = ParseState::InsideBlock;
                self.emit_first_line();
            }
            ParseState::AfterPathMarkerLine => {
                self.state = ParseState::InsideBlock;
                if is_blank(line) {
                    trace!("Swallowed blank line after file-path marker");
                    return;
                }
            }
            ParseState::OutsideBlock | ParseState::InsideBlock => {}
        }

        if complete {
            if let Some(fence) = Fence::parse(line) {
                if self.handle_fence(fence, line) {
                    return;
                }
            }
        }
        self.push_content(line, complete);
    }

    /// Returns `true` if the fence line was consumed (block opened or
    /// closed); nested fences are left to be handled as content.
    fn handle_fence(&mut self, fence: Fence, line: &str) -> bool {
        let Some(block) = self.block.as_mut() else {
            self.open_block(fence, line);
            return true;
        };
        if !fence.pairs_with(&block.fence) {
            return false;
        }
        if fence.language.is_some() {
            block.depth += 1;
            trace!("Block {} nested fence opened, depth {}", block.info.index, block.depth);
            false
        } else if block.depth > 1 {
            block.depth -= 1;
            trace!("Block {} nested fence closed, depth {}", block.info.index, block.depth);
            false
        } else {
            self.close_block(line);
            true
        }
    }

    fn try_consume_marker(&mut self, line: &str) -> bool {
        let Some(block) = self.block.as_mut() else {
            return false;
        };
        let Some(path) = block.marker.and_then(|m| m.extract(line)) else {
            return false;
        };

        if block.info.resource.is_none() {
            match self.resolver.resolve(path) {
                Some(location) => {
                    debug!(
                        "Block {} marker {} resolved to {}",
                        block.info.index,
                        path,
                        location.display()
                    );
                    block.info.resource = Some(location);
                }
                None => debug!("Block {} marker {} left unresolved", block.info.index, path),
            }
        }
        self.state = ParseState::AfterPathMarkerLine;
        self.emit_first_line();
        true
    }

    fn push_content(&mut self, line: &str, complete: bool) {
        let in_code = self.block.is_some();
        let rewritten = match &self.rewriter {
            Some(rewriter) if complete && rewriter.matches(line, in_code) => {
                Some(rewriter.rewrite(line, in_code))
            }
            _ => None,
        };
        self.emit_fragment(rewritten.as_deref().unwrap_or(line));
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Append text to whichever buffer is active and forward it.
    fn emit_fragment(&mut self, text: &str) {
        match &self.block {
            Some(block) => {
                self.code.push_str(text);
                self.sink.markdown(text, Some(&block.info));
            }
            None => {
                self.markdown_before.push_str(text);
                self.sink.markdown(text, None);
            }
        }
    }

    fn emit_first_line(&mut self) {
        if let Some(block) = self.block.as_mut() {
            if let Some(line) = block.first_line.take() {
                self.sink.markdown(&line, Some(&block.info));
            }
        }
    }

    fn open_block(&mut self, fence: Fence, line: &str) {
        let index = self.next_index;
        self.next_index += 1;
        let marker = fence.language.as_deref().and_then(FilepathMarker::for_tag);
        debug!(
            "Block {} opened with {} (language {:?})",
            index, fence.token, fence.language
        );
        self.block = Some(PendingBlock {
            info: CodeBlockInfo::new(index, fence.language.clone()),
            fence,
            first_line: Some(line.to_string()),
            depth: 1,
            marker,
        });
        self.state = ParseState::AfterFenceLine;
    }

    fn close_block(&mut self, line: &str) {
        let Some(block) = self.block.take() else {
            return;
        };
        self.sink.markdown(line, Some(&block.info));

        let completed = CompletedCodeBlock {
            index: block.info.index,
            code: std::mem::take(&mut self.code),
            language: block.info.language,
            resource: block.info.resource,
            markdown_before_block: std::mem::take(&mut self.markdown_before),
        };
        debug!(
            "Block {} closed ({} bytes of code)",
            completed.index,
            completed.code.len()
        );
        self.sink.code_block(completed);
        self.state = ParseState::OutsideBlock;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(chunks: &[&str]) -> Vec<FenceEvent> {
        let mut parser = StreamingFenceParser::new(Vec::new());
        for chunk in chunks {
            parser.process_chunk(chunk);
        }
        parser.finish()
    }

    fn blocks(events: &[FenceEvent]) -> Vec<CompletedCodeBlock> {
        events
            .iter()
            .filter_map(FenceEvent::as_code_block)
            .cloned()
            .collect()
    }

    fn markdown(events: &[FenceEvent]) -> Vec<(String, Option<usize>)> {
        events
            .iter()
            .filter_map(|e| match e {
                FenceEvent::Markdown { text, info } => {
                    Some((text.clone(), info.as_ref().map(|i| i.index)))
                }
                FenceEvent::CodeBlock(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_plain_markdown_passes_through() {
        let events = run(&["hello\nworld\n"]);
        assert_eq!(
            markdown(&events),
            vec![("hello\n".to_string(), None), ("world\n".to_string(), None)]
        );
        assert!(blocks(&events).is_empty());
    }

    #[test]
    fn test_single_block() {
        let events = run(&["hello\n```ts\nconsole.log(1);\n```"]);
        assert_eq!(
            markdown(&events),
            vec![
                ("hello\n".to_string(), None),
                ("```ts\n".to_string(), Some(0)),
                ("console.log(1);\n".to_string(), Some(0)),
                ("```".to_string(), Some(0)),
            ]
        );
        let blocks = blocks(&events);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "console.log(1);\n");
        assert_eq!(blocks[0].language.as_deref(), Some("ts"));
        assert_eq!(blocks[0].resource, None);
        assert_eq!(blocks[0].markdown_before_block, "hello\n");
    }

    #[test]
    fn test_opening_fence_held_until_next_line() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("```rust\n");
        assert!(parser.sink().is_empty());
        assert_eq!(parser.state(), ParseState::AfterFenceLine);
        parser.process_chunk("fn main() {}\n");
        assert_eq!(parser.sink().len(), 2);
        assert_eq!(parser.state(), ParseState::InsideBlock);
    }

    #[test]
    fn test_marker_is_hidden_and_resolved() {
        let mut parser = StreamingFenceParser::new(Vec::new())
            .with_resolver(|path: &str| Some(PathBuf::from("/ws").join(path.trim_start_matches('/'))));
        parser.process_chunk("```ts\n// filepath: /a/b\n\nlet x = 1;\n```\n");
        let events = parser.finish();

        let lines: Vec<String> = markdown(&events).into_iter().map(|(t, _)| t).collect();
        assert_eq!(lines, vec!["```ts\n", "let x = 1;\n", "```\n"]);
        let expected = Some(PathBuf::from("/ws/a/b"));
        for event in &events {
            if let FenceEvent::Markdown { info: Some(info), .. } = event {
                assert_eq!(info.resource, expected);
            }
        }
        assert_eq!(blocks(&events)[0].code, "let x = 1;\n");
        assert_eq!(blocks(&events)[0].resource, expected);
    }

    #[test]
    fn test_only_one_blank_line_swallowed() {
        let events = run(&["```py\n# filepath: a.py\n\n\nx = 1\n```\n"]);
        assert_eq!(blocks(&events)[0].code, "\nx = 1\n");
    }

    #[test]
    fn test_marker_for_wrong_language_is_code() {
        let events = run(&["```py\n// filepath: a.py\n```\n"]);
        assert_eq!(blocks(&events)[0].code, "// filepath: a.py\n");
    }

    #[test]
    fn test_marker_only_on_first_line() {
        let events = run(&["```ts\nlet a;\n// filepath: a.ts\n```\n"]);
        assert_eq!(blocks(&events)[0].code, "let a;\n// filepath: a.ts\n");
    }

    #[test]
    fn test_unresolved_marker_still_hidden() {
        let events = run(&["```ts\n// filepath: a.ts\nlet a;\n```\n"]);
        let block = &blocks(&events)[0];
        assert_eq!(block.code, "let a;\n");
        assert_eq!(block.resource, None);
    }

    #[test]
    fn test_reported_path_is_not_overwritten_by_marker() {
        let mut parser = StreamingFenceParser::new(Vec::new())
            .with_resolver(|p: &str| Some(PathBuf::from(p)));
        parser.process_chunk("```ts\n");
        parser.report_resolved_path(PathBuf::from("/reported.ts"));
        parser.process_chunk("// filepath: /marker.ts\nlet a;\n```\n");
        let events = parser.finish();
        assert_eq!(blocks(&events)[0].resource, Some(PathBuf::from("/reported.ts")));
    }

    #[test]
    fn test_report_is_write_once_and_ignored_outside_blocks() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.report_resolved_path(PathBuf::from("/ignored"));
        parser.process_chunk("```\nx\n");
        parser.report_resolved_path(PathBuf::from("/first"));
        parser.report_resolved_path(PathBuf::from("/second"));
        assert_eq!(
            parser.current_block().and_then(|b| b.resource.clone()),
            Some(PathBuf::from("/first"))
        );
        parser.process_chunk("```\n");
        let events = parser.finish();
        assert_eq!(blocks(&events)[0].resource, Some(PathBuf::from("/first")));
    }

    #[test]
    fn test_nested_same_character_fences() {
        let text = "````md\n```ts\nlet a;\n```\n````\n";
        let events = run(&[text]);
        let blocks = blocks(&events);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "```ts\nlet a;\n```\n");
    }

    #[test]
    fn test_nested_same_length_fences_use_tags() {
        let text = "```md\nExample:\n```js\nx();\n```\nend\n```\nafter\n";
        let events = run(&[text]);
        let blocks = blocks(&events);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "Example:\n```js\nx();\n```\nend\n");
        assert_eq!(markdown(&events).last(), Some(&("after\n".to_string(), None)));
    }

    #[test]
    fn test_other_fence_character_is_content() {
        let events = run(&["```\n~~~\nx\n~~~\n```\n"]);
        assert_eq!(blocks(&events)[0].code, "~~~\nx\n~~~\n");
    }

    #[test]
    fn test_indices_are_dense() {
        let events = run(&["```a\n1\n```\ntext\n~~~b\n2\n~~~\n```c\n3\n```\n"]);
        let indices: Vec<usize> = blocks(&events).iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(blocks(&events)[1].markdown_before_block, "text\n");
        assert_eq!(blocks(&events)[2].markdown_before_block, "");
    }

    #[test]
    fn test_unterminated_block() {
        let events = run(&["intro\n```rs\nfn a() {}\n"]);
        assert!(blocks(&events).is_empty());
        assert_eq!(markdown(&events).len(), 3);
    }

    #[test]
    fn test_flush_emits_held_opening_fence() {
        let events = run(&["```rs\n"]);
        assert_eq!(markdown(&events), vec![("```rs\n".to_string(), Some(0))]);
        assert!(blocks(&events).is_empty());
    }

    #[test]
    fn test_flush_processes_trailing_fence() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("```\ncode\n```");
        assert!(blocks(parser.sink()).is_empty());
        parser.flush();
        assert_eq!(blocks(parser.sink()).len(), 1);
    }

    #[test]
    fn test_partial_line_emitted_early() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("hel");
        assert_eq!(markdown(parser.sink()), vec![("hel".to_string(), None)]);
        parser.process_chunk("lo\nwor");
        assert_eq!(
            markdown(parser.sink()),
            vec![
                ("hel".to_string(), None),
                ("lo\n".to_string(), None),
                ("wor".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_fence_prefix_is_held() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("``");
        assert!(parser.sink().is_empty());
        parser.process_chunk("`py\n");
        assert!(parser.sink().is_empty());
        assert_eq!(parser.state(), ParseState::AfterFenceLine);
    }

    #[test]
    fn test_held_prefix_released_once_ambiguity_clears() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("`");
        assert!(parser.sink().is_empty());
        parser.process_chunk("x");
        assert_eq!(markdown(parser.sink()), vec![("`x".to_string(), None)]);
    }

    #[test]
    fn test_character_by_character() {
        let text = "a\n```ts\n// filepath: x.ts\n\nlet y;\n```\nb";
        let mut parser = StreamingFenceParser::new(Vec::new());
        for c in text.chars() {
            parser.process_chunk(c.encode_utf8(&mut [0; 4]));
        }
        let events = parser.finish();
        let block = &blocks(&events)[0];
        assert_eq!(block.code, "let y;\n");
        assert_eq!(block.markdown_before_block, "a\n");
        let joined: String = markdown(&events).into_iter().map(|(t, _)| t).collect();
        assert_eq!(joined, "a\n```ts\nlet y;\n```\nb");
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let events = run(&["```py\r", "\n# filepath: a.py\r", "\n\r", "\nx\r\n```\r\n"]);
        let block = &blocks(&events)[0];
        assert_eq!(block.code, "x\r\n");
    }

    #[test]
    fn test_bare_cr_terminates_lines() {
        let events = run(&["one\rtwo\r```\rcode\r```\r"]);
        let block = &blocks(&events)[0];
        assert_eq!(block.code, "code\r");
        assert_eq!(block.markdown_before_block, "one\rtwo\r");
    }

    #[test]
    fn test_empty_chunks_are_ignored() {
        let events = run(&["", "a", "", "\n", ""]);
        let joined: String = markdown(&events).into_iter().map(|(t, _)| t).collect();
        assert_eq!(joined, "a\n");
    }

    struct Shout;

    impl LineRewriter for Shout {
        fn matches(&self, text: &str, in_code_block: bool) -> bool {
            !in_code_block && ("!!".starts_with(text) || text.starts_with("!!"))
        }

        fn rewrite(&self, line: &str, _in_code_block: bool) -> String {
            line.to_uppercase()
        }
    }

    #[test]
    fn test_rewriter_applies_to_markdown_lines() {
        let mut parser = StreamingFenceParser::new(Vec::new()).with_rewriter(Shout);
        parser.process_chunk("!!hi\nlow\n```\n!!code\n```\n");
        let events = parser.finish();
        let lines: Vec<String> = markdown(&events).into_iter().map(|(t, _)| t).collect();
        assert_eq!(lines, vec!["!!HI\n", "low\n", "```\n", "!!code\n", "```\n"]);
        assert_eq!(blocks(&events)[0].markdown_before_block, "!!HI\nlow\n");
    }

    #[test]
    fn test_rewriter_prefix_holds_partial() {
        let mut parser = StreamingFenceParser::new(Vec::new()).with_rewriter(Shout);
        parser.process_chunk("!");
        assert!(parser.sink().is_empty());
        parser.process_chunk("!yo\n");
        assert_eq!(markdown(parser.sink()), vec![("!!YO\n".to_string(), None)]);
    }

    #[test]
    fn test_reset() {
        let mut parser = StreamingFenceParser::new(Vec::new());
        parser.process_chunk("```\nabc");
        parser.reset();
        assert_eq!(parser.state(), ParseState::OutsideBlock);
        assert!(parser.current_block().is_none());
        parser.process_chunk("```\nx\n```\n");
        let events = parser.finish();
        assert_eq!(blocks(&events)[0].index, 0);
    }

    #[test]
    fn test_closure_sinks() {
        let mut lines = Vec::new();
        let mut completed = Vec::new();
        {
            let sink = (
                |text: &str, info: Option<&CodeBlockInfo>| {
                    lines.push((text.to_string(), info.map(|i| i.index)))
                },
                |block: CompletedCodeBlock| completed.push(block),
            );
            let mut parser = StreamingFenceParser::new(sink);
            parser.process_chunk("x\n```\ny\n```\n");
            parser.flush();
        }
        assert_eq!(lines.len(), 4);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].code, "y\n");
    }
}
