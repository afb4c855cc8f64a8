//! Benchmarks for richpost parsing and rendering.
//!
//! Run with: cargo bench
//!
//! These benchmarks exercise the full pipeline at various document sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use richpost::render::{self, RenderOptions};

/// Creates a wire-format document with the given number of sections.
///
/// Each section has a heading, a paragraph with marks and a link, a bulleted
/// list, and every fifth section adds a small table and an image.
fn create_test_document(section_count: usize) -> String {
    let mut blocks = Vec::with_capacity(section_count * 4);

    for i in 0..section_count {
        blocks.push(format!(
            r#"{{"type": "heading-two", "children": [{{"text": "Section {i}"}}]}}"#
        ));
        blocks.push(format!(
            r#"{{"type": "paragraph", "children": [
                {{"text": "Paragraph {i} has "}},
                {{"text": "bold", "bold": true}},
                {{"text": " and "}},
                {{"text": "both", "bold": true, "italic": true}},
                {{"text": " text plus a "}},
                {{"type": "link", "href": "https://example.com/{i}", "children": [{{"text": "link"}}]}}
            ]}}"#
        ));
        blocks.push(
            r#"{"type": "bulleted-list", "children": [
                {"type": "list-item", "children": [{"text": "first"}]},
                {"type": "list-item", "children": [{"text": "second"}]}
            ]}"#
            .to_string(),
        );
        if i % 5 == 0 {
            blocks.push(
                r#"{"type": "table", "children": [{"type": "table_body", "children": [
                    {"type": "table_row", "children": [
                        {"type": "table_cell", "children": [{"text": "a"}]},
                        {"type": "table_cell", "children": [{"text": "b"}]}
                    ]}
                ]}]}"#
                    .to_string(),
            );
            blocks.push(format!(
                r#"{{"type": "image", "src": "https://cdn.example.com/{i}.png", "title": "Figure {i}", "children": [{{"text": ""}}]}}"#
            ));
        }
    }

    format!(r#"{{"children": [{}]}}"#, blocks.join(","))
}

/// Benchmark wire-format parsing.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [10, 100, 500].iter() {
        let json = create_test_document(*section_count);
        group.throughput(Throughput::Bytes(json.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &json,
            |b, json| {
                b.iter(|| richpost::parse_document(black_box(json)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark rendering to HTML, the main path.
fn bench_html_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_rendering");

    for section_count in [10, 100, 500].iter() {
        let doc = richpost::parse_document(&create_test_document(*section_count)).unwrap();
        let options = RenderOptions::default();

        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &doc,
            |b, doc| {
                b.iter(|| render::render_html(black_box(doc), &options));
            },
        );
    }

    group.finish();
}

/// Benchmark the text and Markdown renderers.
fn bench_text_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_rendering");

    for section_count in [10, 100, 500].iter() {
        let doc = richpost::parse_document(&create_test_document(*section_count)).unwrap();

        group.bench_with_input(BenchmarkId::new("text", section_count), &doc, |b, doc| {
            b.iter(|| render::to_text(black_box(doc)));
        });
        group.bench_with_input(
            BenchmarkId::new("markdown", section_count),
            &doc,
            |b, doc| {
                b.iter(|| render::to_markdown(black_box(doc)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_html_rendering,
    bench_text_rendering,
);
criterion_main!(benches);
