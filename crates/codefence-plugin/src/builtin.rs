//! Built-in rewriters.

use codefence_config::RewriteScope;
use codefence_parser::LineRewriter;

/// Expands tabs in the indentation of code-block lines.
///
/// Tabs advance to the next multiple of `width`. Tabs after the first
/// non-blank character are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabExpander {
    width: usize,
}

impl TabExpander {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Default for TabExpander {
    fn default() -> Self {
        Self::new(4)
    }
}

fn indentation(text: &str) -> &str {
    let rest = text.trim_start_matches([' ', '\t']);
    &text[..text.len() - rest.len()]
}

impl LineRewriter for TabExpander {
    fn matches(&self, text: &str, in_code_block: bool) -> bool {
        if !in_code_block {
            return false;
        }
        let indent = indentation(text);
        // All-blank text may still be followed by a tab.
        indent.contains('\t') || indent.len() == text.len()
    }

    fn rewrite(&self, line: &str, _in_code_block: bool) -> String {
        let indent = indentation(line);
        let mut out = String::with_capacity(line.len() + self.width);
        let mut column = 0;
        for c in indent.chars() {
            let n = if c == '\t' {
                self.width - column % self.width
            } else {
                1
            };
            out.extend(std::iter::repeat(' ').take(n));
            column += n;
        }
        out.push_str(&line[indent.len()..]);
        out
    }
}

/// Replaces a leading token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRewriter {
    prefix: String,
    replacement: String,
    scope: RewriteScope,
}

impl PrefixRewriter {
    pub fn new(
        prefix: impl Into<String>,
        replacement: impl Into<String>,
        scope: RewriteScope,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            replacement: replacement.into(),
            scope,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl LineRewriter for PrefixRewriter {
    /// Also true while `text` is still a prefix of the token, so a partial
    /// line is held until it is clear whether the token is there.
    fn matches(&self, text: &str, in_code_block: bool) -> bool {
        self.scope.applies(in_code_block)
            && (text.starts_with(&self.prefix) || self.prefix.starts_with(text))
    }

    fn rewrite(&self, line: &str, _in_code_block: bool) -> String {
        match line.strip_prefix(&self.prefix) {
            Some(rest) => format!("{}{}", self.replacement, rest),
            None => line.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_expander_only_in_code() {
        let tabs = TabExpander::new(4);
        assert!(tabs.matches("\tx\n", true));
        assert!(!tabs.matches("\tx\n", false));
        assert!(!tabs.matches("x\n", true));
        assert!(!tabs.matches("    x\n", true));
    }

    #[test]
    fn test_tab_expander_holds_blank_partials() {
        let tabs = TabExpander::new(4);
        assert!(tabs.matches("  ", true));
        assert!(tabs.matches(" \t", true));
    }

    #[test]
    fn test_tab_expander_rewrite() {
        let tabs = TabExpander::new(4);
        assert_eq!(tabs.rewrite("\tx\n", true), "    x\n");
        assert_eq!(tabs.rewrite("\t\tx\n", true), "        x\n");
        assert_eq!(tabs.rewrite("  \tx\ty\n", true), "    x\ty\n");
        assert_eq!(tabs.rewrite("x\n", true), "x\n");
    }

    #[test]
    fn test_tab_expander_zero_width() {
        let tabs = TabExpander::new(0);
        assert_eq!(tabs.width(), 1);
        assert_eq!(tabs.rewrite("\tx", true), " x");
    }

    #[test]
    fn test_prefix_rewriter_matches_partial_token() {
        let rw = PrefixRewriter::new("$ ", "", RewriteScope::Code);
        assert!(rw.matches("$", true));
        assert!(rw.matches("$ ls\n", true));
        assert!(!rw.matches("ls\n", true));
        assert!(!rw.matches("$ ls\n", false));
    }

    #[test]
    fn test_prefix_rewriter_rewrite() {
        let rw = PrefixRewriter::new("TODO", "FIXME", RewriteScope::Both);
        assert_eq!(rw.rewrite("TODO: x\n", false), "FIXME: x\n");
        assert_eq!(rw.rewrite("done\n", false), "done\n");
    }
}
