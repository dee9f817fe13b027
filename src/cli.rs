//! Command-line interface for codefence.

use clap::Parser;
use codefence_config::{Config, RewriteRule};
use std::path::PathBuf;

/// cfx - Extract fenced code blocks from streamed markdown.
///
/// Echoes the markdown as it arrives and, optionally, writes every
/// completed code block to disk.
#[derive(Parser, Debug)]
#[command(
    name = "cfx",
    author = "Codefence Contributors",
    version,
    about = "Extract fenced code blocks from streamed LLM markdown as it arrives",
    after_help = "Examples:\n  \
                  llm 'write a CLI' | cfx --annotate\n  \
                  cfx --out-dir blocks answer.md\n  \
                  cfx --root . --out-dir . --overwrite reply.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Feed the parser in pieces of N characters (0 = as read)
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Prefix code-block lines with [index:language]
    #[arg(long = "annotate")]
    pub annotate: bool,

    /// Write completed code blocks under DIR
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Replace files that already exist in the output directory
    #[arg(long = "overwrite")]
    pub overwrite: bool,

    /// Resolve file-path markers against DIR
    #[arg(long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Accept file-path markers that point outside the root
    #[arg(long = "allow-outside-root")]
    pub allow_outside_root: bool,

    /// Expand leading tabs in code blocks
    #[arg(long = "expand-tabs")]
    pub expand_tabs: bool,

    /// Spaces per tab for --expand-tabs
    #[arg(long = "tab-width", value_name = "N")]
    pub tab_width: Option<usize>,

    /// Replace a leading PREFIX with REPLACEMENT (repeatable)
    #[arg(long = "rewrite", value_name = "PREFIX=REPLACEMENT", value_parser = parse_rewrite)]
    pub rewrite: Vec<RewriteRule>,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

fn parse_rewrite(pair: &str) -> Result<RewriteRule, String> {
    RewriteRule::parse_pair(pair).ok_or_else(|| format!("expected PREFIX=REPLACEMENT, got {pair:?}"))
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Layer command-line options over a loaded configuration.
    ///
    /// Flags only ever switch features on; options replace the configured
    /// value when given.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(n) = self.chunk_size {
            config.features.chunk_size = n;
        }
        if self.annotate {
            config.features.annotate = true;
        }
        if self.expand_tabs {
            config.features.expand_tabs = true;
        }
        if let Some(width) = self.tab_width {
            config.features.tab_width = width;
        }
        if let Some(dir) = &self.out_dir {
            config.output.dir = dir.to_string_lossy().into_owned();
        }
        if self.overwrite {
            config.output.overwrite = true;
        }
        if let Some(root) = &self.root {
            config.resolver.root = root.to_string_lossy().into_owned();
        }
        if self.allow_outside_root {
            config.resolver.allow_outside_root = true;
        }
        config.rewrite.extend(self.rewrite.iter().cloned());
    }
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());
    let exists = Config::config_path().is_some_and(|p| p.exists());

    println!("paths:");
    println!("  config                {}", config_path);
    println!("  config exists         {}", exists);
}
