//! Benchmarks for restyle styling performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks style synthetic Markdown documents in memory.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use restyle::format::{FormatHandler, MarkdownHandler};
use restyle::{
    DocumentStyler, LexiconClassifier, Selector, StyleOptions, StyleRule, TokenClassifier,
};

const SENTENCES: [&str; 4] = [
    "The quick brown fox jumps over the lazy dog.",
    "Researchers quickly published their careful analysis of the data.",
    "She walked to the old market and bought fresh bread.",
    "Large teams often struggle with unclear goals.",
];

/// Creates a Markdown document with the given number of sections.
fn create_test_markdown(sections: usize) -> String {
    let mut content = String::new();
    for i in 0..sections {
        content.push_str(&format!("## Section {}\n", i + 1));
        for sentence in SENTENCES {
            content.push_str(sentence);
            content.push(' ');
        }
        content.push('\n');
    }
    content
}

fn rules() -> Vec<StyleRule> {
    [
        "bold 50% of heading",
        "italic 30% of noun",
        "color 20% of verb (200,0,0)",
        "uppercase 10% of adjective",
    ]
    .iter()
    .map(|s| s.parse().unwrap())
    .collect()
}

/// Benchmark the lexicon classifier alone.
fn bench_classification(c: &mut Criterion) {
    let classifier = LexiconClassifier::new();
    let text = SENTENCES.join(" ");

    c.bench_function("classify_paragraph", |b| {
        b.iter(|| classifier.classify(black_box(&text)).unwrap());
    });
}

/// Benchmark styling at various document sizes.
fn bench_styling(c: &mut Criterion) {
    let handler = MarkdownHandler::new();
    let styler = DocumentStyler::new(Arc::new(LexiconClassifier::new()))
        .with_options(StyleOptions::new().with_seed(7));
    let rules = rules();

    let mut group = c.benchmark_group("styling");
    for sections in [1, 10, 50].iter() {
        let source = create_test_markdown(*sections);
        let doc = handler.parse(&source).unwrap();

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| {
                let mut doc = doc.clone();
                styler
                    .style_with(black_box(&mut doc), &rules, &mut Selector::seeded(7))
                    .unwrap()
            });
        });
    }
    group.finish();
}

/// Benchmark parse, style and render together.
fn bench_round_trip(c: &mut Criterion) {
    let handler = MarkdownHandler::new();
    let styler = DocumentStyler::new(Arc::new(LexiconClassifier::new()));
    let rules = rules();
    let source = create_test_markdown(10);

    c.bench_function("markdown_round_trip", |b| {
        b.iter(|| {
            let mut doc = handler.parse(black_box(&source)).unwrap();
            styler
                .style_with(&mut doc, &rules, &mut Selector::seeded(1))
                .unwrap();
            handler.render(&doc).unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_classification,
    bench_styling,
    bench_round_trip,
);
criterion_main!(benches);
