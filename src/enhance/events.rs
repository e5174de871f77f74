//! Events, handlers and the listener registry.

use std::collections::HashMap;

use crate::dom::NodeId;

/// A keyboard key, as reported by `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Other(String),
}

impl Key {
    /// Map a DOM key value to a [`Key`].
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

/// Event types a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Scroll,
}

/// One notification from an intersection source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Visible fraction of the target.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn entering(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: true,
            ratio: 1.0,
        }
    }

    pub fn leaving(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Input delivered to [`Enhancer::dispatch`](super::Enhancer::dispatch).
///
/// Click and key events bubble from their target up through its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer activation of an element.
    Click(NodeId),
    KeyDown { target: NodeId, key: Key },
    /// The viewport scrolled; the new offset is read from the host.
    Scroll,
    Intersection(Vec<IntersectionEntry>),
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// A handler suppressed the platform's default action.
    pub default_prevented: bool,
    /// Number of handler invocations.
    pub handled: usize,
}

impl Outcome {
    pub(crate) fn merge(&mut self, other: Outcome) {
        self.default_prevented |= other.default_prevented;
        self.handled += other.handled;
    }
}

/// Behaviors the enhancement components attach to targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    FollowAnchor,
    ReturnToTop,
    SyncAffordance,
    SyncProgress,
    InspectImage,
    InspectImageKey,
    PanelKey { group: usize, index: usize },
}

/// Listener registry.
///
/// Adding a handler that is already registered for the same target and
/// event kind is a no-op, the same way `addEventListener` ignores a repeated
/// listener. Re-binding therefore never stacks duplicates.
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    map: HashMap<(EventTarget, EventKind), Vec<Handler>>,
}

impl Listeners {
    /// Register a handler; returns false if it was already present.
    pub fn add(&mut self, target: EventTarget, kind: EventKind, handler: Handler) -> bool {
        let handlers = self.map.entry((target, kind)).or_default();
        if handlers.contains(&handler) {
            return false;
        }
        handlers.push(handler);
        true
    }

    pub fn handlers(&self, target: EventTarget, kind: EventKind) -> &[Handler] {
        self.map
            .get(&(target, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.map.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("ArrowDown"), Key::ArrowDown);
        assert_eq!(Key::from_dom("Home"), Key::Home);
        assert_eq!(Key::from_dom("Tab"), Key::Other("Tab".to_string()));
    }

    #[test]
    fn test_listeners_deduplicate() {
        let mut listeners = Listeners::default();
        let target = EventTarget::Node(NodeId(3));

        assert!(listeners.add(target, EventKind::Click, Handler::FollowAnchor));
        assert!(!listeners.add(target, EventKind::Click, Handler::FollowAnchor));
        assert!(listeners.add(target, EventKind::KeyDown, Handler::InspectImageKey));

        assert_eq!(listeners.handlers(target, EventKind::Click), &[Handler::FollowAnchor]);
        assert_eq!(listeners.len(), 2);
        assert!(listeners.handlers(EventTarget::Window, EventKind::Scroll).is_empty());
    }
}
