//! cfx - Extract fenced code blocks from streamed markdown.
//!
//! This binary provides the CLI interface to the codefence library,
//! feeding files or stdin through the streaming parser as the bytes arrive.

mod cli;
mod input;
mod output;

use clap::Parser as ClapParser;
use cli::Cli;
use codefence_config::Config;
use codefence_core::Result;
use codefence_parser::{StreamingFenceParser, WorkspaceResolver};
use log::{debug, error, info, warn, LevelFilter};
use output::{BlockSummary, BlockWriter, TerminalSink};
use std::fs::File;
use std::io::{self, Read, Write};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("cfx v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    debug!("Effective config: {:?}", config);

    let stdout = io::stdout();
    let color = config.features.annotate && atty::is(atty::Stream::Stdout);
    let sink = TerminalSink::new(stdout.lock()).annotate(config.features.annotate, color);

    let mut parser = build_parser(&config, sink);
    let chunk_size = config.features.chunk_size;

    if cli.should_read_stdin() {
        info!("Reading from stdin");
        feed(&mut parser, io::stdin().lock(), chunk_size)?;
    } else {
        for path in &cli.files {
            info!("Processing file: {}", path.display());
            let file = File::open(path)?;
            feed(&mut parser, file, chunk_size)?;
            // Each file is its own document.
            parser.reset();
        }
    }

    let completed = parser.finish().into_completed()?;
    report(&completed);
    Ok(())
}

/// Load configuration with optional overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        Config::default()
    });

    if let Some(ref config_arg) = cli.config {
        config.merge(&Config::parse_override(config_arg)?);
        debug!("Merged config override: {}", config_arg);
    }

    cli.apply_to(&mut config);
    Ok(config)
}

/// Wire the parser to its resolver, rewriters and block writer.
fn build_parser<W: Write>(
    config: &Config,
    sink: TerminalSink<W>,
) -> StreamingFenceParser<TerminalSink<W>> {
    let resolver = WorkspaceResolver::new(config.resolver.root())
        .allow_outside_root(config.resolver.allow_outside_root);
    debug!("Resolving file-path markers against {}", resolver.root().display());

    let sink = match config.output.dir() {
        Some(dir) => {
            info!("Writing code blocks under {}", dir.display());
            sink.with_writer(
                BlockWriter::new(dir, resolver.root()).overwrite(config.output.overwrite),
            )
        }
        None => sink,
    };

    let parser = StreamingFenceParser::new(sink).with_resolver(resolver);
    match codefence_plugin::from_config(config) {
        Some(chain) => parser.with_rewriter(chain),
        None => parser,
    }
}

/// Feed one input through the parser and flush it.
fn feed<W: Write, R: Read>(
    parser: &mut StreamingFenceParser<TerminalSink<W>>,
    reader: R,
    chunk_size: usize,
) -> Result<()> {
    let mut failure = None;
    let read = input::read_text(reader, |text| {
        for piece in input::split_chars(text, chunk_size) {
            parser.process_chunk(piece);
        }
        parser.sink_mut().flush_output().map_err(|e| {
            let err = io::Error::new(io::ErrorKind::Other, e.to_string());
            failure = Some(e);
            err
        })
    });

    if let Some(e) = failure {
        return Err(e);
    }
    read?;

    parser.flush();
    parser.sink_mut().flush_output()
}

/// Log what came out of the stream.
fn report(completed: &[BlockSummary]) {
    info!("{} code block(s) completed", completed.len());
    for block in completed {
        let language = block.language.as_deref().unwrap_or("-");
        match &block.written_to {
            Some(path) => info!(
                "  #{} {} ({} lines) -> {}",
                block.index,
                language,
                block.lines,
                path.display()
            ),
            None => info!("  #{} {} ({} lines)", block.index, language, block.lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parser_for(args: &[&str]) -> StreamingFenceParser<TerminalSink<Vec<u8>>> {
        let cli = Cli::parse_from(args);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        build_parser(&config, TerminalSink::new(Vec::new()))
    }

    #[test]
    fn test_feed_chunked_matches_whole() {
        let text = "a\n```rs\n// filepath: src/x.rs\n\nfn x() {}\n```\nb\n";

        let mut whole = parser_for(&["cfx"]);
        feed(&mut whole, text.as_bytes(), 0).unwrap();
        let mut chunked = parser_for(&["cfx"]);
        feed(&mut chunked, text.as_bytes(), 1).unwrap();

        assert_eq!(whole.sink().completed(), chunked.sink().completed());
        assert_eq!(whole.sink().completed().len(), 1);
    }

    #[test]
    fn test_feed_writes_marked_block() {
        let root = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let root_arg = root.path().to_string_lossy().into_owned();
        let out_arg = out.path().to_string_lossy().into_owned();

        let mut parser = parser_for(&["cfx", "--root", &root_arg, "-o", &out_arg]);
        let text = "```py\n# filepath: pkg/app.py\nprint(1)\n```\n";
        feed(&mut parser, text.as_bytes(), 3).unwrap();

        let written = out.path().join("pkg").join("app.py");
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "print(1)\n");
        assert_eq!(parser.sink().completed()[0].written_to, Some(written));
    }

    #[test]
    fn test_rewrite_option_applies() {
        let mut parser = parser_for(&["cfx", "--rewrite", "$ =", "--expand-tabs"]);
        feed(&mut parser, "```sh\n$ ls\n\tcd /\n```\n".as_bytes(), 2).unwrap();
        let sink = parser.finish();
        let echoed = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert_eq!(echoed, "```sh\nls\n    cd /\n```\n");
        assert_eq!(sink.completed()[0].lines, 2);
    }
}
