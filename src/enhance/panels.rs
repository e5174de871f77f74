//! Keyboard navigation and ARIA linkage for collapsible panel groups.

use std::collections::HashSet;

use super::events::{EventKind, EventTarget, Handler, Key, Listeners};
use crate::config::{CompiledSelectors, EnhanceConfig};
use crate::dom::{Document, NodeId};

/// One panel-group container and its triggers in document order.
#[derive(Debug, Clone)]
pub struct PanelGroup {
    pub container: NodeId,
    pub triggers: Vec<NodeId>,
}

/// Binds every panel group in the content root.
#[derive(Debug, Default)]
pub struct PanelBinder {
    groups: Vec<PanelGroup>,
    regions_linked: usize,
}

impl PanelBinder {
    pub fn groups(&self) -> &[PanelGroup] {
        &self.groups
    }

    /// Regions given an `aria-controls` link by this binder.
    pub fn regions_linked(&self) -> usize {
        self.regions_linked
    }

    pub(crate) fn bind(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        config: &EnhanceConfig,
        selectors: &CompiledSelectors,
        listeners: &mut Listeners,
    ) {
        let mut taken = doc.element_ids();
        for container in doc.select_all(root, &selectors.panel_group) {
            let group = match self.groups.iter().position(|g| g.container == container) {
                Some(known) => known,
                None => {
                    self.groups.push(PanelGroup {
                        container,
                        triggers: doc.select_all(container, &selectors.panel_trigger),
                    });
                    self.groups.len() - 1
                }
            };

            for (index, &trigger) in self.groups[group].triggers.iter().enumerate() {
                listeners.add(
                    EventTarget::Node(trigger),
                    EventKind::KeyDown,
                    Handler::PanelKey { group, index },
                );
            }

            self.regions_linked +=
                link_regions(doc, container, group, config, selectors, &mut taken);
        }
        log::debug!(
            "panel binder: {} groups, {} regions linked",
            self.groups.len(),
            self.regions_linked
        );
    }

    /// Trigger that should receive focus after `key` on trigger `index`.
    pub(crate) fn navigate(&self, group: usize, index: usize, key: &Key) -> Option<NodeId> {
        let triggers = &self.groups.get(group)?.triggers;
        target_index(triggers.len(), index, key).map(|i| triggers[i])
    }
}

/// Destination index for a navigation key within `len` triggers.
///
/// ArrowDown and ArrowUp stop at the ends; Home and End jump to them. Any
/// other key yields `None` and keeps its default handling.
pub fn target_index(len: usize, index: usize, key: &Key) -> Option<usize> {
    if len == 0 || index >= len {
        return None;
    }
    match key {
        Key::ArrowDown if index + 1 < len => Some(index + 1),
        Key::ArrowUp if index > 0 => Some(index - 1),
        Key::Home => Some(0),
        Key::End => Some(len - 1),
        _ => None,
    }
}

/// Link each item's trigger to its region where no link exists yet.
fn link_regions(
    doc: &mut Document,
    container: NodeId,
    group: usize,
    config: &EnhanceConfig,
    selectors: &CompiledSelectors,
    taken: &mut HashSet<String>,
) -> usize {
    let mut linked = 0;
    for (index, item) in doc.select_all(container, &selectors.panel_item).into_iter().enumerate() {
        let trigger = doc.select_first(item, &selectors.panel_trigger);
        let region = doc.select_first(item, &selectors.panel_region);
        let (Some(trigger), Some(region)) = (trigger, region) else {
            continue;
        };
        if doc.has_attr(trigger, "aria-controls") {
            continue;
        }

        let region_id = match doc.element_id(region).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let base = format!("{}-{group}-{index}", config.ids.region_prefix);
                let id = unique_id(taken, &base);
                doc.set_attr(region, "id", &id);
                taken.insert(id.clone());
                id
            }
        };
        doc.set_attr(trigger, "aria-controls", &region_id);
        linked += 1;
    }
    linked
}

/// `base`, or `base-2`, `base-3`, ... whichever is not yet taken.
fn unique_id(taken: &HashSet<String>, base: &str) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}
