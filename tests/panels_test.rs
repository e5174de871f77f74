//! Collapsible panel keyboard navigation and region linkage.

use std::collections::HashSet;

use lucent::dom::{Document, NodeId, parse_html};
use lucent::enhance::target_index;
use lucent::{EnhanceConfig, Enhancer, Event, HeadlessHost, Key};
use proptest::prelude::*;

fn page() -> Document {
    parse_html(include_str!("fixtures/article.html"))
}

fn triggers(doc: &Document) -> Vec<NodeId> {
    ["q1", "q2", "q3"]
        .iter()
        .map(|id| doc.get_by_id(id).unwrap())
        .collect()
}

fn press(
    enhancer: &mut Enhancer,
    doc: &mut Document,
    host: &mut HeadlessHost,
    target: NodeId,
    key: Key,
) -> bool {
    enhancer
        .dispatch(doc, host, &Event::KeyDown { target, key })
        .default_prevented
}

#[test]
fn test_arrow_navigation() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let t = triggers(&doc);

    assert!(press(&mut enhancer, &mut doc, &mut host, t[0], Key::ArrowDown));
    assert_eq!(doc.focused(), Some(t[1]));

    assert!(press(&mut enhancer, &mut doc, &mut host, t[1], Key::ArrowUp));
    assert_eq!(doc.focused(), Some(t[0]));
}

#[test]
fn test_arrows_stop_at_ends() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let t = triggers(&doc);

    assert!(!press(&mut enhancer, &mut doc, &mut host, t[2], Key::ArrowDown));
    assert_eq!(doc.focused(), None);

    assert!(!press(&mut enhancer, &mut doc, &mut host, t[0], Key::ArrowUp));
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_home_and_end() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let t = triggers(&doc);

    assert!(press(&mut enhancer, &mut doc, &mut host, t[1], Key::End));
    assert_eq!(doc.focused(), Some(t[2]));

    assert!(press(&mut enhancer, &mut doc, &mut host, t[2], Key::Home));
    assert_eq!(doc.focused(), Some(t[0]));
}

#[test]
fn test_other_keys_keep_default() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();
    let t = triggers(&doc);

    assert!(!press(&mut enhancer, &mut doc, &mut host, t[0], Key::Enter));
    assert!(!press(&mut enhancer, &mut doc, &mut host, t[0], Key::from_dom("a")));
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_regions_get_unique_linked_ids() {
    let mut doc = page();
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let mut seen = HashSet::new();
    for trigger in triggers(&doc) {
        let controls = doc.get_attr(trigger, "aria-controls").unwrap().to_string();
        assert!(!controls.is_empty());
        let region = doc.get_by_id(&controls).unwrap();
        assert!(doc.has_class(region, "accordion-collapse"));
        assert!(seen.insert(controls));
    }

    let q2 = doc.get_by_id("q2").unwrap();
    assert_eq!(doc.get_attr(q2, "aria-controls"), Some("faq-two"));
    let q1 = doc.get_by_id("q1").unwrap();
    assert_eq!(doc.get_attr(q1, "aria-controls"), Some("accordion-collapse-0-0"));
    assert_eq!(enhancer.panels().regions_linked(), 3);
}

#[test]
fn test_synthesized_ids_unique_across_groups() {
    let item = r#"<div class="accordion-item"><button class="accordion-button">q</button><div class="accordion-collapse">a</div></div>"#;
    let html = format!(
        r#"<main><div id="accordion-collapse-1-0"></div><div class="accordion">{item}{item}</div><div class="accordion">{item}</div></main>"#
    );
    let mut doc = parse_html(&html);
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(enhancer.panels().groups().len(), 2);
    let main = doc.find_by_tag("main").unwrap();
    let ids: Vec<String> = doc
        .descendants(main)
        .into_iter()
        .filter(|&n| doc.has_class(n, "accordion-button"))
        .map(|n| doc.get_attr(n, "aria-controls").unwrap().to_string())
        .collect();

    assert_eq!(
        ids,
        ["accordion-collapse-0-0", "accordion-collapse-0-1", "accordion-collapse-1-0-2"]
    );
}

#[test]
fn test_existing_controls_kept() {
    let mut doc = parse_html(
        r#"<main><div class="accordion"><div class="accordion-item"><button class="accordion-button" aria-controls="elsewhere">q</button><div class="accordion-collapse">a</div></div></div></main>"#,
    );
    let mut host = HeadlessHost::new();
    let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
        .unwrap()
        .unwrap();

    let trigger = doc.find_by_tag("button").unwrap();
    assert_eq!(doc.get_attr(trigger, "aria-controls"), Some("elsewhere"));
    assert_eq!(enhancer.panels().regions_linked(), 0);
}

proptest! {
    #[test]
    fn prop_navigation_stays_in_bounds(len in 1usize..12, index in 0usize..12) {
        prop_assume!(index < len);

        let down = target_index(len, index, &Key::ArrowDown);
        if index + 1 < len {
            prop_assert_eq!(down, Some(index + 1));
        } else {
            prop_assert_eq!(down, None);
        }

        let up = target_index(len, index, &Key::ArrowUp);
        prop_assert_eq!(up, index.checked_sub(1));

        prop_assert_eq!(target_index(len, index, &Key::Home), Some(0));
        prop_assert_eq!(target_index(len, index, &Key::End), Some(len - 1));
    }
}
