//! Capabilities of the browsing environment.
//!
//! Enhancements never touch a runtime directly. Everything outside the
//! document (scroll position, layout metrics, history, intersection
//! observation, and the UI framework's overlay and widget primitives) is
//! reached through [`Host`]. Optional capabilities are probed by asking the
//! host for them; `None` selects the component's fallback or makes it inert.
//!
//! [`HeadlessHost`] is a complete in-memory host. It backs the CLI and the
//! wasm bindings and records every side effect so tests can assert on them.

use std::collections::{BTreeSet, HashMap};

use crate::dom::{Document, NodeId};

/// A request to smoothly move the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollInstruction {
    pub top: f64,
}

impl ScrollInstruction {
    pub fn smooth(top: f64) -> Self {
        Self { top }
    }
}

/// Options for an intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Visible fraction of the element that counts as intersecting.
    pub threshold: f64,
    /// Margin grown around the viewport, in CSS syntax.
    pub root_margin: String,
}

/// Viewport-intersection observation.
pub trait IntersectionSource {
    fn observe(&mut self, target: NodeId, options: &WatchOptions);
    fn unobserve(&mut self, target: NodeId);
}

/// The UI framework's modal primitive.
pub trait OverlayController {
    fn show(&mut self, doc: &mut Document, overlay: NodeId);
}

/// Framework widgets constructed on trigger elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Tooltip,
    Popover,
}

/// The UI framework's tooltip/popover factory.
pub trait WidgetFactory {
    fn create(&mut self, kind: WidgetKind, trigger: NodeId);
}

/// The browsing environment an enhanced page lives in.
pub trait Host {
    /// Vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;

    fn scroll_to(&mut self, scroll: ScrollInstruction);

    /// Distance from the document top to the element's top edge.
    fn element_top(&self, doc: &Document, node: NodeId) -> f64;

    /// Total scrollable height of the document.
    fn document_height(&self) -> f64;

    fn viewport_height(&self) -> f64;

    /// Replace the URL fragment without navigating.
    fn push_history(&mut self, fragment: &str);

    fn intersection(&mut self) -> Option<&mut dyn IntersectionSource> {
        None
    }

    fn overlay_controller(&mut self) -> Option<&mut dyn OverlayController> {
        None
    }

    fn widget_factory(&mut self) -> Option<&mut dyn WidgetFactory> {
        None
    }
}

/// Intersection source that remembers what is being watched.
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    observed: BTreeSet<NodeId>,
    options: Option<WatchOptions>,
}

impl RecordingWatcher {
    pub fn is_observed(&self, node: NodeId) -> bool {
        self.observed.contains(&node)
    }

    pub fn observed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.observed.iter().copied()
    }

    /// Options of the most recent `observe` call.
    pub fn options(&self) -> Option<&WatchOptions> {
        self.options.as_ref()
    }
}

impl IntersectionSource for RecordingWatcher {
    fn observe(&mut self, target: NodeId, options: &WatchOptions) {
        self.observed.insert(target);
        self.options = Some(options.clone());
    }

    fn unobserve(&mut self, target: NodeId) {
        self.observed.remove(&target);
    }
}

/// Overlay controller that marks shown overlays the way Bootstrap does.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    shown: Vec<NodeId>,
}

impl RecordingOverlay {
    pub fn shown(&self) -> &[NodeId] {
        &self.shown
    }
}

impl OverlayController for RecordingOverlay {
    fn show(&mut self, doc: &mut Document, overlay: NodeId) {
        doc.add_class(overlay, "show");
        doc.set_attr(overlay, "aria-hidden", "false");
        self.shown.push(overlay);
    }
}

/// Widget factory that records each construction.
#[derive(Debug, Default)]
pub struct RecordingWidgets {
    created: Vec<(WidgetKind, NodeId)>,
}

impl RecordingWidgets {
    pub fn created(&self) -> &[(WidgetKind, NodeId)] {
        &self.created
    }
}

impl WidgetFactory for RecordingWidgets {
    fn create(&mut self, kind: WidgetKind, trigger: NodeId) {
        self.created.push((kind, trigger));
    }
}

/// In-memory host without layout.
///
/// Element tops default to zero unless set with [`set_element_top`]. Scroll
/// instructions move the offset immediately, clamped to the scrollable
/// range.
///
/// [`set_element_top`]: HeadlessHost::set_element_top
#[derive(Debug)]
pub struct HeadlessHost {
    offset: f64,
    document_height: f64,
    viewport_height: f64,
    tops: HashMap<NodeId, f64>,
    scrolls: Vec<ScrollInstruction>,
    history: Vec<String>,
    watcher: Option<RecordingWatcher>,
    overlay: Option<RecordingOverlay>,
    widgets: Option<RecordingWidgets>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// A host with intersection observation and no framework primitives.
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            document_height: 4000.0,
            viewport_height: 800.0,
            tops: HashMap::new(),
            scrolls: Vec::new(),
            history: Vec::new(),
            watcher: Some(RecordingWatcher::default()),
            overlay: None,
            widgets: None,
        }
    }

    pub fn without_intersection(mut self) -> Self {
        self.watcher = None;
        self
    }

    pub fn with_overlay_controller(mut self) -> Self {
        self.overlay = Some(RecordingOverlay::default());
        self
    }

    pub fn with_widget_factory(mut self) -> Self {
        self.widgets = Some(RecordingWidgets::default());
        self
    }

    pub fn with_heights(mut self, document: f64, viewport: f64) -> Self {
        self.document_height = document;
        self.viewport_height = viewport;
        self
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub fn set_element_top(&mut self, node: NodeId, top: f64) {
        self.tops.insert(node, top);
    }

    /// Every scroll instruction received, oldest first.
    pub fn scrolls(&self) -> &[ScrollInstruction] {
        &self.scrolls
    }

    /// Every fragment pushed into history, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn watcher(&self) -> Option<&RecordingWatcher> {
        self.watcher.as_ref()
    }

    pub fn overlay(&self) -> Option<&RecordingOverlay> {
        self.overlay.as_ref()
    }

    pub fn widgets(&self) -> Option<&RecordingWidgets> {
        self.widgets.as_ref()
    }
}

impl Host for HeadlessHost {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn scroll_to(&mut self, scroll: ScrollInstruction) {
        let max = (self.document_height - self.viewport_height).max(0.0);
        self.offset = scroll.top.clamp(0.0, max);
        self.scrolls.push(scroll);
    }

    fn element_top(&self, _doc: &Document, node: NodeId) -> f64 {
        self.tops.get(&node).copied().unwrap_or(0.0)
    }

    fn document_height(&self) -> f64 {
        self.document_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn push_history(&mut self, fragment: &str) {
        self.history.push(fragment.to_string());
    }

    fn intersection(&mut self) -> Option<&mut dyn IntersectionSource> {
        self.watcher
            .as_mut()
            .map(|w| w as &mut dyn IntersectionSource)
    }

    fn overlay_controller(&mut self) -> Option<&mut dyn OverlayController> {
        self.overlay
            .as_mut()
            .map(|o| o as &mut dyn OverlayController)
    }

    fn widget_factory(&mut self) -> Option<&mut dyn WidgetFactory> {
        self.widgets.as_mut().map(|w| w as &mut dyn WidgetFactory)
    }
}
