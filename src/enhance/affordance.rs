//! Floating return-to-top control.

use super::events::{EventKind, EventTarget, Handler, Listeners};
use crate::config::EnhanceConfig;
use crate::dom::{Document, NodeId};
use crate::host::{Host, ScrollInstruction};

const CONTROL_STYLE: &str = "position: fixed; bottom: 25px; right: 25px; width: 45px; \
     height: 45px; display: flex; align-items: center; justify-content: center; \
     opacity: 0; visibility: hidden; transition: opacity 0.3s, visibility 0.3s; \
     z-index: 1000; box-shadow: 0 2px 10px rgba(0, 0, 0, 0.2);";

/// A control that appears once the reader has scrolled past a threshold.
#[derive(Debug)]
pub struct ViewportAffordance {
    control: NodeId,
    threshold: f64,
}

impl ViewportAffordance {
    /// Find the control a previous pass left in `root`, or synthesize it.
    pub(crate) fn install(doc: &mut Document, root: NodeId, config: &EnhanceConfig) -> Self {
        let class = &config.ids.control_class;
        let existing = doc
            .descendants(root)
            .into_iter()
            .find(|&n| doc.is_tag(n, "button") && doc.has_class(n, class));

        let control = match existing {
            Some(control) => control,
            None => {
                let label = &config.strings.back_to_top;
                let classes = format!("{class} btn btn-primary rounded-circle");
                let control = doc.append_element(
                    root,
                    "button",
                    &[
                        ("type", "button"),
                        ("class", classes.as_str()),
                        ("aria-label", label.as_str()),
                        ("title", label.as_str()),
                        ("style", CONTROL_STYLE),
                    ],
                );
                doc.append_element(control, "i", &[("class", "bi bi-arrow-up")]);
                log::debug!("viewport affordance: control synthesized");
                control
            }
        };

        Self {
            control,
            threshold: config.scroll_threshold,
        }
    }

    pub(crate) fn bind(&self, listeners: &mut Listeners) {
        listeners.add(EventTarget::Window, EventKind::Scroll, Handler::SyncAffordance);
        listeners.add(
            EventTarget::Node(self.control),
            EventKind::Click,
            Handler::ReturnToTop,
        );
    }

    pub fn control(&self) -> NodeId {
        self.control
    }

    /// Visibility for a given offset: strictly past the threshold.
    pub fn visible_at(&self, offset: f64) -> bool {
        offset > self.threshold
    }

    pub fn is_visible(&self, doc: &Document) -> bool {
        doc.style_property(self.control, "visibility").as_deref() == Some("visible")
    }

    pub(crate) fn sync(&self, doc: &mut Document, host: &dyn Host) {
        let (opacity, visibility) = if self.visible_at(host.scroll_offset()) {
            ("1", "visible")
        } else {
            ("0", "hidden")
        };
        doc.set_style_property(self.control, "opacity", opacity);
        doc.set_style_property(self.control, "visibility", visibility);
    }

    pub(crate) fn return_to_top(&self, host: &mut dyn Host) {
        host.scroll_to(ScrollInstruction::smooth(0.0));
    }
}
