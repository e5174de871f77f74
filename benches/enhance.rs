//! Benchmarks for the enhancement pass.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use lucent::dom::{parse_html, to_html};
use lucent::{EnhanceConfig, Enhancer, Event, HeadlessHost};

const ARTICLE: &str = include_str!("../tests/fixtures/article.html");

/// The fixture article with its main content repeated `copies` times.
fn long_article(copies: usize) -> String {
    let start = ARTICLE.find("<main>").unwrap() + "<main>".len();
    let end = ARTICLE.find("</main>").unwrap();
    let body = &ARTICLE[start..end];
    let mut html = String::with_capacity(ARTICLE.len() * copies);
    html.push_str(&ARTICLE[..start]);
    for _ in 0..copies {
        html.push_str(body);
    }
    html.push_str(&ARTICLE[end..]);
    html
}

// ============================================================================
// Parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let html = long_article(50);
    c.bench_function("parse_article_x50", |b| {
        b.iter(|| parse_html(black_box(&html)));
    });
}

// ============================================================================
// Bootstrap
// ============================================================================

fn bench_bootstrap(c: &mut Criterion) {
    let html = long_article(50);
    let config = EnhanceConfig::default();
    let selectors = config.compile().unwrap();

    c.bench_function("bootstrap_article_x50", |b| {
        b.iter(|| {
            let mut doc = parse_html(&html);
            let mut host = HeadlessHost::new().with_widget_factory();
            Enhancer::with_selectors(&mut doc, &mut host, config.clone(), selectors.clone())
        });
    });
}

fn bench_rebind(c: &mut Criterion) {
    let mut doc = parse_html(&long_article(50));
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    c.bench_function("rebind_article_x50", |b| {
        b.iter(|| enhancer.rebind(&mut doc, &mut host));
    });
}

// ============================================================================
// Dispatch
// ============================================================================

fn bench_scroll_dispatch(c: &mut Criterion) {
    let mut doc = parse_html(ARTICLE);
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let mut offset = 0.0;
    c.bench_function("dispatch_scroll", |b| {
        b.iter(|| {
            offset = (offset + 37.0) % 3200.0;
            host.set_scroll_offset(offset);
            enhancer.dispatch(&mut doc, &mut host, &Event::Scroll)
        });
    });
}

fn bench_serialize(c: &mut Criterion) {
    let mut doc = parse_html(&long_article(50));
    let mut host = HeadlessHost::new();
    Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    c.bench_function("serialize_enhanced_x50", |b| {
        b.iter(|| to_html(black_box(&doc)));
    });
}

criterion_group!(
    benches,
    // Parsing
    bench_parse,
    // Bootstrap
    bench_bootstrap,
    bench_rebind,
    // Dispatch
    bench_scroll_dispatch,
    bench_serialize,
);
criterion_main!(benches);
