//! Fence tag to language id mapping.
//!
//! Maps the tags people write after a fence ("py", "ts", "sh") to a
//! canonical language id ("python", "typescript", "shellscript").

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static mapping of fence tags.
///
/// Each entry maps a lowercase tag to its canonical language id.
pub static LANGUAGE_IDS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Python
    m.insert("python", "python");
    m.insert("py", "python");
    m.insert("python3", "python");
    m.insert("py3", "python");

    // JavaScript
    m.insert("javascript", "javascript");
    m.insert("js", "javascript");
    m.insert("mjs", "javascript");
    m.insert("cjs", "javascript");
    m.insert("node", "javascript");
    m.insert("jsx", "javascriptreact");
    m.insert("javascriptreact", "javascriptreact");

    // TypeScript
    m.insert("typescript", "typescript");
    m.insert("ts", "typescript");
    m.insert("mts", "typescript");
    m.insert("tsx", "typescriptreact");
    m.insert("typescriptreact", "typescriptreact");

    // Rust
    m.insert("rust", "rust");
    m.insert("rs", "rust");

    // Shell
    m.insert("bash", "shellscript");
    m.insert("sh", "shellscript");
    m.insert("shell", "shellscript");
    m.insert("shellscript", "shellscript");
    m.insert("zsh", "shellscript");
    m.insert("fish", "shellscript");

    // C family
    m.insert("c", "c");
    m.insert("h", "c");
    m.insert("cpp", "cpp");
    m.insert("cxx", "cpp");
    m.insert("cc", "cpp");
    m.insert("hpp", "cpp");
    m.insert("csharp", "csharp");
    m.insert("cs", "csharp");
    m.insert("objc", "objective-c");
    m.insert("objectivec", "objective-c");
    m.insert("objcpp", "objective-cpp");

    // JVM
    m.insert("java", "java");
    m.insert("kotlin", "kotlin");
    m.insert("kt", "kotlin");
    m.insert("scala", "scala");
    m.insert("groovy", "groovy");
    m.insert("gradle", "groovy");
    m.insert("clojure", "clojure");
    m.insert("clj", "clojure");

    // Other compiled languages
    m.insert("go", "go");
    m.insert("golang", "go");
    m.insert("swift", "swift");
    m.insert("dart", "dart");
    m.insert("d", "d");
    m.insert("zig", "zig");
    m.insert("nim", "nim");
    m.insert("crystal", "crystal");
    m.insert("cr", "crystal");
    m.insert("pascal", "pascal");
    m.insert("delphi", "pascal");
    m.insert("fortran", "fortran");
    m.insert("f90", "fortran");
    m.insert("solidity", "solidity");
    m.insert("sol", "solidity");
    m.insert("vb", "vb");
    m.insert("vbnet", "vb");

    // Scripting
    m.insert("ruby", "ruby");
    m.insert("rb", "ruby");
    m.insert("php", "php");
    m.insert("perl", "perl");
    m.insert("pl", "perl");
    m.insert("lua", "lua");
    m.insert("r", "r");
    m.insert("julia", "julia");
    m.insert("jl", "julia");
    m.insert("elixir", "elixir");
    m.insert("ex", "elixir");
    m.insert("exs", "elixir");
    m.insert("erlang", "erlang");
    m.insert("erl", "erlang");
    m.insert("coffeescript", "coffeescript");
    m.insert("coffee", "coffeescript");
    m.insert("powershell", "powershell");
    m.insert("ps1", "powershell");
    m.insert("pwsh", "powershell");
    m.insert("bat", "bat");
    m.insert("batch", "bat");
    m.insert("cmd", "bat");

    // Functional
    m.insert("haskell", "haskell");
    m.insert("hs", "haskell");
    m.insert("ocaml", "ocaml");
    m.insert("ml", "ocaml");
    m.insert("fsharp", "fsharp");
    m.insert("fs", "fsharp");
    m.insert("lisp", "lisp");
    m.insert("elisp", "lisp");
    m.insert("scheme", "scheme");
    m.insert("racket", "scheme");

    // Data and query
    m.insert("sql", "sql");
    m.insert("mysql", "sql");
    m.insert("postgresql", "sql");
    m.insert("postgres", "sql");
    m.insert("sqlite", "sql");
    m.insert("json", "json");
    m.insert("jsonc", "jsonc");
    m.insert("json5", "jsonc");
    m.insert("yaml", "yaml");
    m.insert("yml", "yaml");
    m.insert("toml", "toml");
    m.insert("ini", "ini");
    m.insert("cfg", "ini");
    m.insert("graphql", "graphql");
    m.insert("gql", "graphql");
    m.insert("proto", "proto");
    m.insert("protobuf", "proto");

    // Markup and styles
    m.insert("html", "html");
    m.insert("htm", "html");
    m.insert("xhtml", "html");
    m.insert("xml", "xml");
    m.insert("svg", "xml");
    m.insert("xsl", "xml");
    m.insert("markdown", "markdown");
    m.insert("md", "markdown");
    m.insert("vue", "vue");
    m.insert("svelte", "svelte");
    m.insert("css", "css");
    m.insert("scss", "scss");
    m.insert("less", "less");
    m.insert("latex", "latex");
    m.insert("tex", "latex");

    // Build and infra
    m.insert("makefile", "makefile");
    m.insert("make", "makefile");
    m.insert("mk", "makefile");
    m.insert("dockerfile", "dockerfile");
    m.insert("docker", "dockerfile");
    m.insert("terraform", "terraform");
    m.insert("tf", "terraform");
    m.insert("hcl", "terraform");

    // No comment syntax
    m.insert("diff", "diff");
    m.insert("patch", "diff");
    m.insert("text", "plaintext");
    m.insert("txt", "plaintext");
    m.insert("plain", "plaintext");
    m.insert("plaintext", "plaintext");

    m
});

/// Look up the canonical language id for a fence tag.
///
/// Returns `None` for tags that are not known.
///
/// # Example
/// ```
/// use codefence_syntax::language_id;
///
/// assert_eq!(language_id("py"), Some("python"));
/// assert_eq!(language_id("TS"), Some("typescript"));
/// assert_eq!(language_id("unknown"), None);
/// ```
pub fn language_id(tag: &str) -> Option<&'static str> {
    let lower = tag.to_lowercase();
    LANGUAGE_IDS.get(lower.as_str()).copied()
}

/// Get all fence tags that map to a language id.
///
/// # Example
/// ```
/// use codefence_syntax::tags_for;
///
/// let tags = tags_for("python");
/// assert!(tags.contains(&"py"));
/// assert!(tags.contains(&"python"));
/// ```
pub fn tags_for(language_id: &str) -> Vec<&'static str> {
    LANGUAGE_IDS
        .iter()
        .filter_map(|(tag, id)| if *id == language_id { Some(*tag) } else { None })
        .collect()
}
