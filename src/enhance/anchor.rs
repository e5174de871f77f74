//! Smooth in-page anchor navigation.

use percent_encoding::percent_decode_str;

use super::events::{EventKind, EventTarget, Handler, Listeners};
use crate::dom::{Document, NodeId, SelectorSet};
use crate::host::{Host, ScrollInstruction};

/// Intercepts fragment links inside the content root.
#[derive(Debug)]
pub struct AnchorNavigator {
    links: Vec<NodeId>,
    offset: f64,
}

impl AnchorNavigator {
    pub fn new(offset: f64) -> Self {
        Self {
            links: Vec::new(),
            offset,
        }
    }

    /// Links wired so far, in document order.
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub(crate) fn bind(
        &mut self,
        doc: &Document,
        root: NodeId,
        selector: &SelectorSet,
        listeners: &mut Listeners,
    ) {
        for link in doc.select_all(root, selector) {
            if listeners.add(EventTarget::Node(link), EventKind::Click, Handler::FollowAnchor) {
                self.links.push(link);
            }
        }
        log::debug!("anchor navigator: {} links wired", self.links.len());
    }

    /// Follow an activated link. Returns true when the default jump was
    /// replaced; false leaves the link's default behavior untouched.
    pub(crate) fn follow(
        &self,
        doc: &mut Document,
        host: &mut dyn Host,
        root: NodeId,
        link: NodeId,
    ) -> bool {
        let Some(fragment) = doc.get_attr(link, "href").and_then(|h| h.strip_prefix('#')) else {
            return false;
        };
        if fragment.is_empty() {
            return false;
        }
        let fragment = fragment.to_string();

        let Some(target) = resolve_fragment(doc, root, &fragment) else {
            return false;
        };

        let top = host.element_top(doc, target) - self.offset;
        host.scroll_to(ScrollInstruction::smooth(top));
        host.push_history(&format!("#{fragment}"));

        if !doc.has_attr(target, "tabindex") {
            doc.set_attr(target, "tabindex", "-1");
        }
        doc.focus(target);
        true
    }
}

/// Resolve a fragment to an element inside `root`.
///
/// The percent-decoded form is tried first, then the raw fragment.
pub(crate) fn resolve_fragment(doc: &Document, root: NodeId, fragment: &str) -> Option<NodeId> {
    let decoded = percent_decode_str(fragment).decode_utf8().ok();
    decoded
        .as_deref()
        .into_iter()
        .chain(std::iter::once(fragment))
        .filter_map(|id| doc.get_by_id(id))
        .find(|&target| doc.contains(root, target))
}
