//! Bootstrap, rebind and widget activation tests.

use lucent::dom::{Document, parse_html, to_html};
use lucent::enhance::{BOUND_ATTR, REVEALED_CLASS};
use lucent::{
    EnhanceConfig, Enhancer, Error, Event, HeadlessHost, IntersectionEntry, WidgetKind,
    enhance_html,
};

fn page() -> Document {
    parse_html(include_str!("fixtures/article.html"))
}

fn count(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_missing_root_enhances_nothing() {
    let source = r##"<body><a href="#x">x</a><section id="x">s</section></body>"##;
    let mut doc = parse_html(source);
    let before = to_html(&doc);
    let mut host = HeadlessHost::new();

    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default()).unwrap();

    assert!(enhancer.is_none());
    assert_eq!(to_html(&doc), before);
    assert_eq!(host.watcher().unwrap().observed().count(), 0);
}

#[test]
fn test_invalid_selector_fails_before_touching_document() {
    let mut doc = page();
    let before = to_html(&doc);
    let mut host = HeadlessHost::new();
    let mut config = EnhanceConfig::default();
    config.selectors.images = "figure img[".to_string();

    let result = Enhancer::bootstrap(&mut doc, &mut host, config);

    assert!(matches!(result, Err(Error::InvalidSelector { .. })));
    assert_eq!(to_html(&doc), before);
}

#[test]
fn test_custom_content_root() {
    let mut doc = parse_html(r#"<article><section>s</section></article>"#);
    let mut host = HeadlessHost::new();
    let config = EnhanceConfig::default().with_content_root("article");

    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, config).unwrap().unwrap();
    assert_eq!(Some(enhancer.root()), doc.find_by_tag("article"));
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_counts() {
    let mut doc = page();
    let mut host = HeadlessHost::new().with_widget_factory();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let report = enhancer.report();
    assert_eq!(report.anchor_links, 4);
    assert!(report.return_to_top);
    assert!(report.reading_progress);
    assert_eq!(report.inspectable_images, 2);
    assert_eq!(report.animated_blocks, 4);
    assert_eq!(report.panel_groups, 1);
    assert_eq!(report.panel_triggers, 3);
    assert_eq!(report.regions_linked, 3);
    assert_eq!(report.widgets, 2);
    assert_eq!(report.listeners, enhancer.listener_count());

    let text = report.to_string();
    assert!(text.contains("Anchor links: 4"));
    assert!(text.contains("Panel groups: 1 (3 triggers, 3 regions linked)"));
}

#[test]
fn test_enhance_html_convenience() {
    let (report, html) =
        enhance_html(include_str!("fixtures/article.html"), EnhanceConfig::default()).unwrap();

    assert_eq!(report.unwrap().inspectable_images, 2);
    assert!(html.contains(r#"id="imageLightbox""#));

    let (report, _) = enhance_html("<p>no root</p>", EnhanceConfig::default()).unwrap();
    assert!(report.is_none());
}

// ============================================================================
// Widgets
// ============================================================================

#[test]
fn test_widgets_created_through_factory() {
    let mut doc = page();
    let mut host = HeadlessHost::new().with_widget_factory();
    Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let hint = doc.get_by_id("hint").unwrap();
    let more = doc.get_by_id("more").unwrap();
    assert_eq!(
        host.widgets().unwrap().created(),
        [(WidgetKind::Tooltip, hint), (WidgetKind::Popover, more)]
    );
    assert_eq!(doc.get_attr(hint, BOUND_ATTR), Some("tooltip"));
    assert_eq!(doc.get_attr(more, BOUND_ATTR), Some("popover"));
}

#[test]
fn test_widgets_skipped_without_factory() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(enhancer.report().widgets, 0);
    let hint = doc.get_by_id("hint").unwrap();
    assert!(!doc.has_attr(hint, BOUND_ATTR));
}

// ============================================================================
// Author markup
// ============================================================================

#[test]
fn test_raw_text_and_foreign_markup_round_trip() {
    let page = concat!(
        r#"<main><noscript><img src="fallback.png"></noscript>"#,
        r##"<svg><use xlink:href="#icon"></use></svg>"##,
        r#"<iframe><p>not markup</p></iframe><section>s</section></main>"#,
    );
    let (report, html) = enhance_html(page, EnhanceConfig::default()).unwrap();

    assert!(report.is_some());
    assert!(html.contains(r#"<noscript><img src="fallback.png"></noscript>"#));
    assert!(html.contains(r##"<use xlink:href="#icon"></use>"##));
    assert!(html.contains("<iframe><p>not markup</p></iframe>"));
}

#[test]
fn test_template_content_is_left_alone() {
    let mut doc = parse_html(concat!(
        r##"<main><template><section id="tpl">x</section><a href="#live">in template</a>"##,
        r#"<div id="accordion-collapse-0-0"></div></template>"#,
        r#"<section id="live">y</section>"#,
        r#"<div class="accordion"><div class="accordion-item">"#,
        r#"<button class="accordion-button">Q</button><div class="accordion-collapse">A</div>"#,
        r#"</div></div></main>"#,
    ));
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let report = enhancer.report();
    assert_eq!(report.animated_blocks, 1);
    assert_eq!(report.anchor_links, 0);
    assert_eq!(report.regions_linked, 1);

    let trigger = doc.find_by_tag("button").unwrap();
    assert_eq!(doc.get_attr(trigger, "aria-controls"), Some("accordion-collapse-0-0"));

    let html = to_html(&doc);
    assert!(html.contains(concat!(
        r##"<template><section id="tpl">x</section><a href="#live">in template</a>"##,
        r#"<div id="accordion-collapse-0-0"></div></template>"#,
    )));
}

// ============================================================================
// Rebind
// ============================================================================

#[test]
fn test_rebind_is_idempotent() {
    let mut doc = page();
    let mut host = HeadlessHost::new()
        .with_widget_factory()
        .with_overlay_controller();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let first = enhancer.report();
    let q1 = doc.get_by_id("q1").unwrap();
    let region_id = doc.get_attr(q1, "aria-controls").unwrap().to_string();

    let second = enhancer.rebind(&mut doc, &mut host);
    assert_eq!(first, second);

    let html = to_html(&doc);
    assert_eq!(count(&html, r#"class="back-to-top"#), 1);
    assert_eq!(count(&html, r#"id="imageLightbox""#), 1);
    assert_eq!(count(&html, r#"id="lucent-entrance-style""#), 1);
    assert_eq!(doc.get_attr(q1, "aria-controls"), Some(region_id.as_str()));
    assert_eq!(host.widgets().unwrap().created().len(), 2);
}

#[test]
fn test_second_bootstrap_reuses_synthesized_elements() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let first = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let second = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(first.affordance().control(), second.affordance().control());
    assert_eq!(
        first.inspector().unwrap().overlay(),
        second.inspector().unwrap().overlay()
    );
    let html = to_html(&doc);
    assert_eq!(count(&html, r#"id="imageLightbox""#), 1);
    assert_eq!(count(&html, r#"id="lucent-entrance-style""#), 1);
}

#[test]
fn test_rebind_picks_up_new_markup_and_keeps_revealed() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let intro = doc.get_by_id("intro").unwrap();
    enhancer.dispatch(
        &mut doc,
        &mut host,
        &Event::Intersection(vec![IntersectionEntry::entering(intro)]),
    );

    let root = enhancer.root();
    let late = doc.append_element(root, "section", &[("id", "late")]);
    let link = doc.append_element(root, "a", &[("href", "#late")]);

    let report = enhancer.rebind(&mut doc, &mut host);

    assert_eq!(report.anchor_links, 5);
    assert_eq!(report.animated_blocks, 5);
    assert!(doc.has_class(intro, REVEALED_CLASS));
    assert!(!host.watcher().unwrap().is_observed(intro));
    assert!(host.watcher().unwrap().is_observed(late));

    let outcome = enhancer.dispatch(&mut doc, &mut host, &Event::Click(link));
    assert!(outcome.default_prevented);
    assert_eq!(host.history(), ["#late"]);
}

#[test]
fn test_rebind_does_not_stack_listeners() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let before = enhancer.listener_count();

    enhancer.rebind(&mut doc, &mut host);
    enhancer.rebind(&mut doc, &mut host);
    assert_eq!(enhancer.listener_count(), before);

    let link = doc.get_by_id("toc-intro").unwrap();
    let outcome = enhancer.dispatch(&mut doc, &mut host, &Event::Click(link));
    assert_eq!(outcome.handled, 1);
    assert_eq!(host.scrolls().len(), 1);
}
