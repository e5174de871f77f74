//! Entrance animation for content blocks.

use std::collections::BTreeSet;

use super::events::IntersectionEntry;
use crate::config::{CompiledSelectors, EnhanceConfig};
use crate::dom::{Document, NodeId};
use crate::host::{Host, WatchOptions};

/// Class carrying the hidden, offset starting state.
pub const HIDDEN_CLASS: &str = "fade-in-up";
/// Class added once a block has been revealed.
pub const REVEALED_CLASS: &str = "visible";

const ANIMATION_CSS: &str = "
.fade-in-up {
  opacity: 0;
  transform: translateY(20px);
  transition: opacity 0.6s ease-out, transform 0.6s ease-out;
}
.fade-in-up.visible {
  opacity: 1;
  transform: translateY(0);
}
";

/// Reveals each candidate block the first time it scrolls into view.
///
/// A block is observed until it is revealed and never again afterwards;
/// notifications about blocks no longer observed are dropped.
#[derive(Debug)]
pub struct EntranceAnimator {
    observed: BTreeSet<NodeId>,
    revealed: usize,
    options: WatchOptions,
}

impl EntranceAnimator {
    /// Start watching every candidate. Returns `None`, leaving the document
    /// untouched, when there are no candidates or the host cannot observe
    /// intersections.
    pub(crate) fn install(
        doc: &mut Document,
        host: &mut dyn Host,
        root: NodeId,
        config: &EnhanceConfig,
        selectors: &CompiledSelectors,
    ) -> Option<Self> {
        let mut animator = Self {
            observed: BTreeSet::new(),
            revealed: 0,
            options: WatchOptions {
                threshold: config.reveal_threshold,
                root_margin: config.reveal_root_margin.clone(),
            },
        };
        if animator.bind(doc, host, root, config, selectors) {
            Some(animator)
        } else {
            None
        }
    }

    /// Observe candidates not yet observed or revealed. Returns false when
    /// the component has to stay inert.
    pub(crate) fn bind(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        root: NodeId,
        config: &EnhanceConfig,
        selectors: &CompiledSelectors,
    ) -> bool {
        let candidates = doc.select_all(root, &selectors.animatable);
        if candidates.is_empty() {
            return false;
        }
        let Some(watcher) = host.intersection() else {
            return false;
        };

        inject_styles(doc, root, &config.ids.animation_style);

        for block in candidates {
            if doc.has_class(block, REVEALED_CLASS) || self.observed.contains(&block) {
                continue;
            }
            doc.add_class(block, HIDDEN_CLASS);
            watcher.observe(block, &self.options);
            self.observed.insert(block);
        }
        log::debug!(
            "entrance animator: watching {} blocks (threshold {})",
            self.observed.len(),
            self.options.threshold
        );
        true
    }

    /// Reveal every observed block reported as intersecting. Returns the
    /// number revealed by this notification.
    pub(crate) fn notify(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        entries: &[IntersectionEntry],
    ) -> usize {
        let mut revealed = 0;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if !self.observed.remove(&entry.target) {
                continue;
            }
            doc.add_class(entry.target, REVEALED_CLASS);
            if let Some(watcher) = host.intersection() {
                watcher.unobserve(entry.target);
            }
            revealed += 1;
        }
        self.revealed += revealed;
        revealed
    }

    pub fn is_observed(&self, block: NodeId) -> bool {
        self.observed.contains(&block)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Blocks revealed so far.
    pub fn revealed_count(&self) -> usize {
        self.revealed
    }
}

/// Add the transition stylesheet once, to `<head>` when the page has one.
fn inject_styles(doc: &mut Document, root: NodeId, style_id: &str) {
    if doc.get_by_id(style_id).is_some() {
        return;
    }
    let parent = doc.find_by_tag("head").unwrap_or(root);
    let style = doc.append_element(parent, "style", &[("id", style_id)]);
    doc.append_text(style, ANIMATION_CSS);
}
