//! Reading progress bar.

use super::events::{EventKind, EventTarget, Handler, Listeners};
use crate::dom::{Document, NodeId};
use crate::host::Host;

/// Mirrors how far the reader has scrolled into a progress-bar element.
#[derive(Debug)]
pub struct ReadingProgress {
    bar: NodeId,
}

impl ReadingProgress {
    pub(crate) fn new(bar: NodeId) -> Self {
        Self { bar }
    }

    pub(crate) fn bind(&self, listeners: &mut Listeners) {
        listeners.add(EventTarget::Window, EventKind::Scroll, Handler::SyncProgress);
    }

    pub fn bar(&self) -> NodeId {
        self.bar
    }

    pub(crate) fn sync(&self, doc: &mut Document, host: &dyn Host) {
        let percent = scrolled_percent(
            host.scroll_offset(),
            host.document_height(),
            host.viewport_height(),
        );
        doc.set_style_property(self.bar, "width", &format!("{percent}%"));
        doc.set_attr(self.bar, "aria-valuenow", &percent.to_string());
    }
}

/// Percentage of the scrollable height already scrolled, within 0..=100.
pub fn scrolled_percent(offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolled_percent() {
        assert_eq!(scrolled_percent(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scrolled_percent(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scrolled_percent(1000.0, 2000.0, 1000.0), 100.0);
    }

    #[test]
    fn test_unscrollable_document_reports_zero() {
        assert_eq!(scrolled_percent(10.0, 800.0, 800.0), 0.0);
        assert_eq!(scrolled_percent(10.0, 500.0, 800.0), 0.0);
    }

    #[test]
    fn test_overscroll_is_clamped() {
        assert_eq!(scrolled_percent(-40.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scrolled_percent(1200.0, 2000.0, 1000.0), 100.0);
    }
}
