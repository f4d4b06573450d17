//! Benchmarks for chatpage segmentation, detection and rendering.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- segment`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatpage::config::{Assets, ConvertConfig, EncodingMode};
use chatpage::content::classify;
use chatpage::core::bundles;
use chatpage::inputs::InputFile;
use chatpage::message::clean_text;
use chatpage::parser::WhatsAppParser;
use chatpage::render::DocumentRenderer;
use chatpage::translation::{Language, TranslationTable};

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_standard_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let body = match i % 10 {
            0 => " POLL:\nLunch?\nOPTION: Pizza (3 votes)\nOPTION: Sushi (1 vote)".to_string(),
            1 => " EVENT: Party\nEvent Start time: 1700000000000\nEvent Cancelled: false".to_string(),
            2 => " IMG-0001.jpg (file attached)".to_string(),
            _ => format!(" Message number {}", i),
        };
        lines.push(format!("1/15/24, {}:{:02} - {}:{}", i % 24, i % 60, sender, body));
    }
    lines.join("\n")
}

fn generate_mac_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!(
            "[15.01.24, {:02}:{:02}:00] {}: Message number {}",
            i % 24,
            i % 60,
            sender,
            i
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Segmentation
// =============================================================================

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let config = ConvertConfig::new().with_display_name("Bob");
    let parser = WhatsAppParser::new(&config);

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let standard = generate_standard_txt(size);
        let mac = generate_mac_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("standard", size), &standard, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt))));
        });
        group.bench_with_input(BenchmarkId::new("mac", size), &mac, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt))));
        });
    }
    group.finish();
}

// =============================================================================
// Detection
// =============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let table = TranslationTable::builtin();
    let bodies = [
        ("plain", " Just a regular message with some words in it"),
        ("poll", " POLL:\nLunch?\nOPTION: Pizza (3 votes)\nOPTION: Sushi (1 vote)"),
        (
            "event",
            " EVENT: Party\nEvent Start time: 1700000000000\nEvent Description: Cake\nEvent Cancelled: false",
        ),
    ];

    for (name, body) in bodies {
        group.bench_function(name, |b| {
            b.iter(|| black_box(classify(&clean_text(black_box(body)), Language::En, table)));
        });
    }
    group.finish();
}

// =============================================================================
// Rendering
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let assets = Assets::default();
    let files = vec![InputFile::from_bytes("IMG-0001.jpg", vec![0xAB; 64 * 1024])];

    for encoding in [EncodingMode::Inline, EncodingMode::Sideband, EncodingMode::Path] {
        let config = ConvertConfig::new().with_display_name("Bob").with_encoding(encoding);
        let messages = WhatsAppParser::new(&config).parse_str(&generate_standard_txt(1_000));
        let renderer = DocumentRenderer::new(&config, &assets, &files);

        group.throughput(Throughput::Elements(messages.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(encoding), |b| {
            b.iter(|| {
                for bundle in bundles(&messages, 250) {
                    black_box(renderer.render(&bundle, "Alice").unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_segment, bench_classify, bench_render);
criterion_main!(benches);
