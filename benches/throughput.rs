use std::path::PathBuf;

use codefence_core::{CodeBlockInfo, CompletedCodeBlock};
use codefence_parser::{FenceSink, StreamingFenceParser};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

#[derive(Default)]
struct Counter {
    bytes: usize,
    blocks: usize,
}

impl FenceSink for Counter {
    fn markdown(&mut self, text: &str, _info: Option<&CodeBlockInfo>) {
        self.bytes += text.len();
    }

    fn code_block(&mut self, _block: CompletedCodeBlock) {
        self.blocks += 1;
    }
}

/// A reply with `blocks` fenced blocks of mixed languages and prose between.
fn generate_reply(blocks: usize) -> String {
    let mut doc = String::new();
    for i in 0..blocks {
        doc.push_str("Here is the next step of the change, with some `inline` code.\n\n");
        match i % 3 {
            0 => {
                doc.push_str("```rust\n// filepath: src/lib.rs\n\n");
                for n in 0..20 {
                    doc.push_str(&format!("fn item_{n}() -> usize {{ {n} }}\n"));
                }
                doc.push_str("```\n\n");
            }
            1 => {
                doc.push_str("````md\n```py\nprint('nested')\n```\n````\n\n");
            }
            _ => {
                doc.push_str("~~~sh\n# filepath: run.sh\n");
                for n in 0..10 {
                    doc.push_str(&format!("echo step {n}\n"));
                }
                doc.push_str("~~~\n\n");
            }
        }
    }
    doc
}

fn feed(chunks: &[&str]) -> Counter {
    let mut parser = StreamingFenceParser::new(Counter::default())
        .with_resolver(|p: &str| Some(PathBuf::from(p)));
    for chunk in chunks {
        parser.process_chunk(chunk);
    }
    parser.finish()
}

fn bench_feeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.sample_size(20);

    let doc = generate_reply(60);
    group.throughput(Throughput::Bytes(doc.len() as u64));

    group.bench_function("whole_document", |b| {
        b.iter(|| black_box(feed(&[black_box(doc.as_str())])));
    });

    let chars: Vec<String> = doc.chars().map(String::from).collect();
    let per_char: Vec<&str> = chars.iter().map(String::as_str).collect();
    group.bench_function("per_character", |b| {
        b.iter(|| black_box(feed(black_box(&per_char))));
    });

    let tokens: Vec<&str> = doc.split_inclusive(' ').collect();
    group.bench_function("per_token", |b| {
        b.iter(|| black_box(feed(black_box(&tokens))));
    });

    group.finish();
}

criterion_group!(benches, bench_feeding);
criterion_main!(benches);
