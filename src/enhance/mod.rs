//! The enhancement controller.
//!
//! [`Enhancer`] is the enhancement context: built once when the document is
//! ready, it owns the listener registry, the compiled selectors and the state
//! of every component. Nothing is global; events reach the components only
//! through [`Enhancer::dispatch`].
//!
//! ```
//! use lucent::dom::parse_html;
//! use lucent::{EnhanceConfig, Enhancer, Event, HeadlessHost};
//!
//! let mut doc = parse_html(r##"<main><a href="#ch1">Chapter 1</a><h2 id="ch1">One</h2></main>"##);
//! let mut host = HeadlessHost::new();
//! let mut enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
//!     .unwrap()
//!     .expect("page has a content root");
//!
//! let link = doc.find_by_tag("a").unwrap();
//! let outcome = enhancer.dispatch(&mut doc, &mut host, &Event::Click(link));
//! assert!(outcome.default_prevented);
//! assert_eq!(host.history(), ["#ch1"]);
//! ```

mod affordance;
mod anchor;
mod animator;
mod events;
mod inspector;
mod panels;
mod progress;
mod widgets;

pub use affordance::ViewportAffordance;
pub use anchor::AnchorNavigator;
pub use animator::{EntranceAnimator, HIDDEN_CLASS, REVEALED_CLASS};
pub use events::{Event, EventKind, EventTarget, IntersectionEntry, Key, Outcome};
pub use inspector::{DisplayMode, MediaInspector, ViewerState};
pub use panels::{PanelBinder, PanelGroup, target_index};
pub use progress::{ReadingProgress, scrolled_percent};
pub use widgets::BOUND_ATTR;

use std::fmt;

use events::{Handler, Listeners};

use crate::config::{CompiledSelectors, EnhanceConfig};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::host::Host;

/// Enhancement context for one page.
pub struct Enhancer {
    config: EnhanceConfig,
    selectors: CompiledSelectors,
    root: NodeId,
    listeners: Listeners,
    anchors: AnchorNavigator,
    affordance: ViewportAffordance,
    progress: Option<ReadingProgress>,
    inspector: Option<MediaInspector>,
    animator: Option<EntranceAnimator>,
    panels: PanelBinder,
    widgets: usize,
}

impl Enhancer {
    /// Compile `config` and enhance the document.
    ///
    /// Returns `Ok(None)` when the document has no content root: nothing is
    /// wired and the page keeps its default behavior.
    pub fn bootstrap(
        doc: &mut Document,
        host: &mut dyn Host,
        config: EnhanceConfig,
    ) -> Result<Option<Self>> {
        let selectors = config.compile()?;
        Ok(Self::with_selectors(doc, host, config, selectors))
    }

    /// Enhance the document with already compiled selectors.
    pub fn with_selectors(
        doc: &mut Document,
        host: &mut dyn Host,
        config: EnhanceConfig,
        selectors: CompiledSelectors,
    ) -> Option<Self> {
        let root = doc.select_first(doc.document(), &selectors.content_root)?;
        let affordance = ViewportAffordance::install(doc, root, &config);

        let mut enhancer = Self {
            anchors: AnchorNavigator::new(config.anchor_offset),
            config,
            selectors,
            root,
            listeners: Listeners::default(),
            affordance,
            progress: None,
            inspector: None,
            animator: None,
            panels: PanelBinder::default(),
            widgets: 0,
        };
        enhancer.bind_all(doc, host);
        log::debug!("bootstrap complete: {} listeners", enhancer.listeners.len());
        Some(enhancer)
    }

    /// Run every binding pass again.
    ///
    /// Elements synthesized earlier are reused, listeners already registered
    /// are skipped, revealed blocks stay revealed and region ids keep their
    /// values; only markup that appeared since the last pass gets wired.
    pub fn rebind(&mut self, doc: &mut Document, host: &mut dyn Host) -> EnhancementReport {
        self.bind_all(doc, host);
        self.report()
    }

    fn bind_all(&mut self, doc: &mut Document, host: &mut dyn Host) {
        let root = self.root;
        let config = &self.config;
        let selectors = &self.selectors;
        let listeners = &mut self.listeners;

        self.anchors.bind(doc, root, &selectors.anchor_links, listeners);
        self.affordance.bind(listeners);

        if self.inspector.is_none() {
            self.inspector = MediaInspector::install(doc, root, config, selectors);
        }
        if let Some(inspector) = self.inspector.as_mut() {
            inspector.bind(doc, root, config, selectors, listeners);
        }

        if let Some(animator) = self.animator.as_mut() {
            animator.bind(doc, host, root, config, selectors);
        } else {
            self.animator = EntranceAnimator::install(doc, host, root, config, selectors);
        }

        self.panels.bind(doc, root, config, selectors, listeners);

        if self.progress.is_none() {
            self.progress = doc
                .select_first(doc.document(), &selectors.progress_bar)
                .map(ReadingProgress::new);
        }
        if let Some(progress) = &self.progress {
            progress.bind(listeners);
        }

        self.widgets += widgets::activate(doc, host, selectors);
    }

    /// Deliver an event to the registered handlers.
    ///
    /// Click and key events bubble from the target to the document root.
    pub fn dispatch(&mut self, doc: &mut Document, host: &mut dyn Host, event: &Event) -> Outcome {
        log::trace!("dispatch {event:?}");
        match event {
            Event::Click(target) => self.propagate(doc, host, *target, EventKind::Click, event),
            Event::KeyDown { target, .. } => {
                self.propagate(doc, host, *target, EventKind::KeyDown, event)
            }
            Event::Scroll => {
                self.run_listeners(doc, host, EventTarget::Window, EventKind::Scroll, event)
            }
            Event::Intersection(entries) => {
                let revealed = self
                    .animator
                    .as_mut()
                    .map(|animator| animator.notify(doc, host, entries))
                    .unwrap_or(0);
                Outcome {
                    default_prevented: false,
                    handled: revealed,
                }
            }
        }
    }

    fn propagate(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        target: NodeId,
        kind: EventKind,
        event: &Event,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        let mut current = Some(target);
        while let Some(node) = current {
            outcome.merge(self.run_listeners(doc, host, EventTarget::Node(node), kind, event));
            current = doc.parent(node);
        }
        outcome
    }

    fn run_listeners(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        target: EventTarget,
        kind: EventKind,
        event: &Event,
    ) -> Outcome {
        let current = match target {
            EventTarget::Node(node) => node,
            EventTarget::Window => self.root,
        };
        let handlers = self.listeners.handlers(target, kind).to_vec();

        let mut outcome = Outcome::default();
        for handler in handlers {
            outcome.merge(self.run(doc, host, handler, current, event));
        }
        outcome
    }

    fn run(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        handler: Handler,
        current: NodeId,
        event: &Event,
    ) -> Outcome {
        let mut outcome = Outcome {
            default_prevented: false,
            handled: 1,
        };

        match handler {
            Handler::FollowAnchor => {
                outcome.default_prevented = self.anchors.follow(doc, host, self.root, current);
            }
            Handler::ReturnToTop => self.affordance.return_to_top(host),
            Handler::SyncAffordance => self.affordance.sync(doc, host),
            Handler::SyncProgress => {
                if let Some(progress) = &self.progress {
                    progress.sync(doc, host);
                }
            }
            Handler::InspectImage => {
                if let Some(inspector) = self.inspector.as_mut() {
                    inspector.activate(doc, host, &self.selectors, current);
                }
            }
            Handler::InspectImageKey => {
                if let Event::KeyDown {
                    key: Key::Enter | Key::Space,
                    ..
                } = event
                {
                    outcome.default_prevented = true;
                    outcome.merge(self.dispatch(doc, host, &Event::Click(current)));
                }
            }
            Handler::PanelKey { group, index } => {
                if let Event::KeyDown { key, .. } = event
                    && let Some(next) = self.panels.navigate(group, index, key)
                {
                    doc.focus(next);
                    outcome.default_prevented = true;
                }
            }
        }
        outcome
    }

    /// The content root every query is scoped to.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    pub fn anchors(&self) -> &AnchorNavigator {
        &self.anchors
    }

    pub fn affordance(&self) -> &ViewportAffordance {
        &self.affordance
    }

    pub fn progress(&self) -> Option<&ReadingProgress> {
        self.progress.as_ref()
    }

    pub fn inspector(&self) -> Option<&MediaInspector> {
        self.inspector.as_ref()
    }

    pub fn animator(&self) -> Option<&EntranceAnimator> {
        self.animator.as_ref()
    }

    pub fn panels(&self) -> &PanelBinder {
        &self.panels
    }

    /// Number of registered listeners across all targets.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Summary of what is currently wired.
    pub fn report(&self) -> EnhancementReport {
        EnhancementReport {
            anchor_links: self.anchors.links().len(),
            return_to_top: true,
            reading_progress: self.progress.is_some(),
            inspectable_images: self.inspector.as_ref().map_or(0, |i| i.images().len()),
            animated_blocks: self
                .animator
                .as_ref()
                .map_or(0, |a| a.observed_count() + a.revealed_count()),
            panel_groups: self.panels.groups().len(),
            panel_triggers: self.panels.groups().iter().map(|g| g.triggers.len()).sum(),
            regions_linked: self.panels.regions_linked(),
            widgets: self.widgets,
            listeners: self.listeners.len(),
        }
    }
}

/// What a bootstrap or rebind pass wired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnhancementReport {
    pub anchor_links: usize,
    pub return_to_top: bool,
    pub reading_progress: bool,
    pub inspectable_images: usize,
    pub animated_blocks: usize,
    pub panel_groups: usize,
    pub panel_triggers: usize,
    pub regions_linked: usize,
    pub widgets: usize,
    pub listeners: usize,
}

impl fmt::Display for EnhancementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        writeln!(f, "Anchor links: {}", self.anchor_links)?;
        writeln!(f, "Return-to-top control: {}", yes_no(self.return_to_top))?;
        writeln!(f, "Reading progress: {}", yes_no(self.reading_progress))?;
        writeln!(f, "Inspectable images: {}", self.inspectable_images)?;
        writeln!(f, "Animated blocks: {}", self.animated_blocks)?;
        writeln!(
            f,
            "Panel groups: {} ({} triggers, {} regions linked)",
            self.panel_groups, self.panel_triggers, self.regions_linked
        )?;
        writeln!(f, "Framework widgets: {}", self.widgets)?;
        write!(f, "Listeners: {}", self.listeners)
    }
}
