//! Tooltip and popover activation through the host's widget factory.

use crate::config::CompiledSelectors;
use crate::dom::{Document, NodeId};
use crate::host::{Host, WidgetKind};

/// Attribute recording which widget a trigger was handed to.
pub const BOUND_ATTR: &str = "data-widget-bound";

/// Hand every unbound tooltip and popover trigger in the document to the
/// host's widget factory. Returns the number of widgets created; zero when
/// the host has no factory.
pub(crate) fn activate(doc: &mut Document, host: &mut dyn Host, selectors: &CompiledSelectors) -> usize {
    let Some(factory) = host.widget_factory() else {
        return 0;
    };

    let scope = doc.document();
    let mut created = 0;
    for (kind, selector) in [
        (WidgetKind::Tooltip, &selectors.tooltip),
        (WidgetKind::Popover, &selectors.popover),
    ] {
        let triggers: Vec<NodeId> = doc
            .select_all(scope, selector)
            .into_iter()
            .filter(|&t| !doc.has_attr(t, BOUND_ATTR))
            .collect();
        for trigger in triggers {
            factory.create(kind, trigger);
            doc.set_attr(trigger, BOUND_ATTR, kind_name(kind));
            created += 1;
        }
    }
    if created > 0 {
        log::debug!("widget activator: {created} widgets created");
    }
    created
}

fn kind_name(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Tooltip => "tooltip",
        WidgetKind::Popover => "popover",
    }
}
