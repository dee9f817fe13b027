//! Line-comment syntax per language and the `filepath:` marker built on it.
//!
//! A model that wants a block written to a file puts a comment such as
//! `// filepath: src/main.rs` or `<!-- filepath: index.html -->` on the
//! first line of the block. Which comment leader is accepted depends on the
//! block's language.

use crate::languages::language_id;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Keyword that introduces the path inside the comment.
pub const FILEPATH_KEYWORD: &str = "filepath:";

/// How a single-line comment is written in a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    /// Comment leader, e.g. `//` or `<!--`
    pub start: &'static str,
    /// Comment closer for languages without line comments, e.g. `-->`
    pub end: Option<&'static str>,
}

impl CommentSyntax {
    const fn line(start: &'static str) -> Self {
        Self { start, end: None }
    }

    const fn block(start: &'static str, end: &'static str) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

const SLASHES: CommentSyntax = CommentSyntax::line("//");
const HASH: CommentSyntax = CommentSyntax::line("#");
const DASHES: CommentSyntax = CommentSyntax::line("--");
const SEMICOLON: CommentSyntax = CommentSyntax::line(";");
const PERCENT: CommentSyntax = CommentSyntax::line("%");
const HTML: CommentSyntax = CommentSyntax::block("<!--", "-->");
const C_BLOCK: CommentSyntax = CommentSyntax::block("/*", "*/");
const ML_BLOCK: CommentSyntax = CommentSyntax::block("(*", "*)");

/// Comment syntax keyed by language id. Languages without comments
/// (json, diff, plaintext) are absent.
static COMMENT_SYNTAX: LazyLock<HashMap<&'static str, CommentSyntax>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    for id in [
        "javascript",
        "javascriptreact",
        "typescript",
        "typescriptreact",
        "rust",
        "c",
        "cpp",
        "csharp",
        "objective-c",
        "objective-cpp",
        "java",
        "kotlin",
        "scala",
        "groovy",
        "go",
        "swift",
        "dart",
        "d",
        "zig",
        "solidity",
        "php",
        "fsharp",
        "jsonc",
        "scss",
        "less",
        "proto",
    ] {
        m.insert(id, SLASHES);
    }

    for id in [
        "python",
        "shellscript",
        "ruby",
        "perl",
        "r",
        "julia",
        "elixir",
        "coffeescript",
        "powershell",
        "nim",
        "crystal",
        "yaml",
        "toml",
        "graphql",
        "makefile",
        "dockerfile",
        "terraform",
    ] {
        m.insert(id, HASH);
    }

    for id in ["sql", "lua", "haskell"] {
        m.insert(id, DASHES);
    }

    for id in ["clojure", "lisp", "scheme", "ini"] {
        m.insert(id, SEMICOLON);
    }

    for id in ["latex", "erlang"] {
        m.insert(id, PERCENT);
    }

    for id in ["html", "xml", "markdown", "vue", "svelte"] {
        m.insert(id, HTML);
    }

    m.insert("css", C_BLOCK);
    m.insert("ocaml", ML_BLOCK);
    m.insert("pascal", ML_BLOCK);
    m.insert("vb", CommentSyntax::line("'"));
    m.insert("bat", CommentSyntax::line("REM"));
    m.insert("fortran", CommentSyntax::line("!"));

    m
});

/// Look up the comment syntax for a language id.
pub fn comment_syntax(language_id: &str) -> Option<CommentSyntax> {
    COMMENT_SYNTAX.get(language_id).copied()
}

/// A compiled `filepath:` marker pattern for one language.
#[derive(Debug, Clone)]
pub struct FilepathMarker {
    language_id: &'static str,
    syntax: CommentSyntax,
    regex: Regex,
}

static MARKERS: LazyLock<HashMap<&'static str, FilepathMarker>> = LazyLock::new(|| {
    COMMENT_SYNTAX
        .iter()
        .map(|(id, syntax)| (*id, FilepathMarker::compile(id, *syntax)))
        .collect()
});

impl FilepathMarker {
    fn compile(language_id: &'static str, syntax: CommentSyntax) -> Self {
        let pattern = format!(
            r"^\s*{}\s*{}\s*(\S+)",
            regex::escape(syntax.start),
            regex::escape(FILEPATH_KEYWORD)
        );
        // Built from escaped literals, so this cannot fail.
        let regex = Regex::new(&pattern).expect("marker pattern should be valid");
        Self {
            language_id,
            syntax,
            regex,
        }
    }

    /// The marker pattern for a fence tag, if its language has comments.
    ///
    /// # Example
    /// ```
    /// use codefence_syntax::FilepathMarker;
    ///
    /// assert!(FilepathMarker::for_tag("py").is_some());
    /// assert!(FilepathMarker::for_tag("json").is_none());
    /// assert!(FilepathMarker::for_tag("klingon").is_none());
    /// ```
    pub fn for_tag(tag: &str) -> Option<&'static FilepathMarker> {
        language_id(tag).and_then(Self::for_language_id)
    }

    /// The marker pattern for a canonical language id.
    pub fn for_language_id(language_id: &str) -> Option<&'static FilepathMarker> {
        MARKERS.get(language_id)
    }

    pub fn language_id(&self) -> &'static str {
        self.language_id
    }

    pub fn syntax(&self) -> CommentSyntax {
        self.syntax
    }

    /// Extract the path from a marker line.
    ///
    /// The path runs up to the first whitespace or comment closer. The line
    /// may still carry its terminator.
    ///
    /// # Example
    /// ```
    /// use codefence_syntax::FilepathMarker;
    ///
    /// let html = FilepathMarker::for_tag("html").unwrap();
    /// assert_eq!(html.extract("<!-- filepath: site/index.html -->\n"), Some("site/index.html"));
    /// assert_eq!(html.extract("<p>hi</p>\n"), None);
    /// ```
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(line)?;
        let mut path = caps.get(1)?.as_str();
        if let Some(end) = self.syntax.end {
            if let Some(pos) = path.find(end) {
                path = &path[..pos];
            }
        }
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    /// Render the marker comment for a path, without a terminator.
    ///
    /// # Example
    /// ```
    /// use codefence_syntax::FilepathMarker;
    ///
    /// let rust = FilepathMarker::for_tag("rs").unwrap();
    /// assert_eq!(rust.format("src/lib.rs"), "// filepath: src/lib.rs");
    /// ```
    pub fn format(&self, path: &str) -> String {
        match self.syntax.end {
            Some(end) => format!("{} {} {} {}", self.syntax.start, FILEPATH_KEYWORD, path, end),
            None => format!("{} {} {}", self.syntax.start, FILEPATH_KEYWORD, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(tag: &str) -> &'static FilepathMarker {
        FilepathMarker::for_tag(tag).unwrap()
    }

    #[test]
    fn test_slash_languages() {
        assert_eq!(marker("ts").extract("// filepath: /a/b.ts\n"), Some("/a/b.ts"));
        assert_eq!(marker("rust").extract("//filepath:src/main.rs"), Some("src/main.rs"));
        assert_eq!(marker("go").extract("  // filepath: main.go  \r\n"), Some("main.go"));
    }

    #[test]
    fn test_hash_languages() {
        assert_eq!(marker("py").extract("# filepath: app.py\n"), Some("app.py"));
        assert_eq!(marker("yaml").extract("# filepath: ci.yml"), Some("ci.yml"));
        // Wrong leader for the language
        assert_eq!(marker("py").extract("// filepath: app.py\n"), None);
    }

    #[test]
    fn test_block_comment_languages() {
        assert_eq!(
            marker("html").extract("<!-- filepath: index.html -->\n"),
            Some("index.html")
        );
        assert_eq!(
            marker("html").extract("<!-- filepath: index.html-->\n"),
            Some("index.html")
        );
        assert_eq!(marker("css").extract("/* filepath: a.css */"), Some("a.css"));
        assert_eq!(marker("ocaml").extract("(* filepath: a.ml *)"), Some("a.ml"));
    }

    #[test]
    fn test_path_stops_at_whitespace() {
        assert_eq!(
            marker("sql").extract("-- filepath: schema.sql (new file)\n"),
            Some("schema.sql")
        );
    }

    #[test]
    fn test_missing_path() {
        assert_eq!(marker("ts").extract("// filepath:\n"), None);
        assert_eq!(marker("html").extract("<!-- filepath: -->\n"), None);
    }

    #[test]
    fn test_not_a_marker() {
        assert_eq!(marker("ts").extract("console.log(1);\n"), None);
        assert_eq!(marker("ts").extract("// just a comment\n"), None);
        assert_eq!(marker("ts").extract("x = 1 // filepath: a.ts\n"), None);
    }

    #[test]
    fn test_languages_without_comments() {
        assert!(FilepathMarker::for_tag("json").is_none());
        assert!(FilepathMarker::for_tag("diff").is_none());
        assert!(FilepathMarker::for_tag("text").is_none());
    }

    #[test]
    fn test_format_round_trips() {
        for tag in ["ts", "py", "html", "css", "sql", "bat"] {
            let m = marker(tag);
            let line = format!("{}\n", m.format("dir/file.ext"));
            assert_eq!(m.extract(&line), Some("dir/file.ext"), "tag {tag}");
        }
    }

    #[test]
    fn test_every_comment_language_has_a_marker() {
        for id in COMMENT_SYNTAX.keys() {
            let m = FilepathMarker::for_language_id(id).unwrap();
            assert_eq!(m.language_id(), *id);
        }
    }

    #[test]
    fn test_comment_syntax_lookup() {
        assert_eq!(comment_syntax("python"), Some(HASH));
        assert_eq!(comment_syntax("html").and_then(|s| s.end), Some("-->"));
        assert_eq!(comment_syntax("json"), None);
    }
}
