//! Benchmarks for palette operations.
//!
//! Run with: cargo bench -p sigil_palette

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sigil_carton::{CompactString, FxHashMap};
use sigil_palette::{Palette, TagValue};

// =============================================================================
// Test Data
// =============================================================================

/// A handful of directives, one of each common shape
const SMALL_CONFIG: &str = r#"var site = {
  // @toggle label="Show banner" group="Header" hash="v1"
  banner: true,
  // @select label="Theme" group="Header" hash="v2"
  theme: "dark", // default theme
  // @checkbox label="Open days" hash="v3"
  days: ['mon', 'tue', 'wed'],
  // @range label="Price" hash="v4"
  price: [10, 90],
  // @input label="Page size" hash="v5"
  pageSize: 20
};
"#;

/// Many directives interleaved with plain code and URL strings
fn generate_large_config(count: usize) -> String {
    let mut source = String::from("var generated = {\n");
    for i in 0..count {
        source.push_str(&format!(
            "  // plain comment {i}\n  // @input label=\"Field {i}\" group=\"Group {}\" hash=\"h{i}\"\n  field{i}: 'http://example.com/{i}', // endpoint\n  untouched{i}: compute({i}),\n",
            i % 7
        ));
    }
    source.push_str("};\n");
    source
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_parse_small(c: &mut Criterion) {
    let palette = Palette::new().unwrap();
    let mut group = c.benchmark_group("palette_parse");
    group.throughput(Throughput::Bytes(SMALL_CONFIG.len() as u64));

    group.bench_function("small", |b| {
        b.iter(|| {
            let config = palette.parse(black_box(SMALL_CONFIG), None);
            black_box(config.groups.len());
        })
    });

    group.finish();
}

fn bench_parse_large(c: &mut Criterion) {
    let palette = Palette::new().unwrap();
    let source = generate_large_config(500);
    let mut group = c.benchmark_group("palette_parse");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("large", |b| {
        b.iter(|| {
            let config = palette.parse(black_box(&source), None);
            black_box(config.groups.len());
        })
    });

    group.finish();
}

fn bench_inject_large(c: &mut Criterion) {
    let palette = Palette::new().unwrap();
    let source = generate_large_config(500);
    let values: FxHashMap<CompactString, TagValue> = (0..500)
        .step_by(3)
        .map(|i| (CompactString::new(format!("h{i}")), TagValue::from("https://example.org")))
        .collect();
    let mut group = c.benchmark_group("palette_inject");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("large", |b| {
        b.iter(|| {
            let out = palette.inject(black_box(&source), &values, None);
            black_box(out.content.len());
        })
    });

    group.finish();
}

fn bench_allocate_and_strip(c: &mut Criterion) {
    let palette = Palette::new().unwrap();
    let source = generate_large_config(500).replace(" hash=\"", " ref=\"");
    let mut group = c.benchmark_group("palette_maintenance");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("allocate_hashes", |b| {
        b.iter(|| black_box(palette.allocate_hashes(black_box(&source))))
    });
    group.bench_function("strip", |b| {
        b.iter(|| black_box(palette.strip(black_box(&source))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_small,
    bench_parse_large,
    bench_inject_large,
    bench_allocate_and_strip
);
criterion_main!(benches);
