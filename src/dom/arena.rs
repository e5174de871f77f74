//! Arena-allocated page document.
//!
//! The document html5ever parses into, and the one every enhancement
//! mutates afterwards. Nodes live in a single vector; parent/child/sibling
//! links are indices into it. Detached nodes stay allocated but are never
//! reached by traversal from the document root.
//!
//! `<template>` contents live under a separate [`NodeData::Fragment`] node,
//! outside the tree, so queries never see them.

use std::collections::{HashMap, HashSet};

use html5ever::{LocalName, Namespace, QualName, ns};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Inert contents of a `<template>` element.
    Fragment,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Parsed `id` attribute.
        id: Option<String>,
        /// Parsed `class` attribute tokens.
        classes: Vec<String>,
    },
    Text(String),
    Comment(String),
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// A mutable page document.
///
/// Besides the tree itself the document tracks which element currently
/// holds input focus, mirroring `document.activeElement`.
pub struct Document {
    nodes: Vec<Node>,
    document: NodeId,
    focused: Option<NodeId>,
    templates: HashMap<NodeId, NodeId>,
}

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
            focused: None,
            templates: HashMap::new(),
        };
        doc.document = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of allocated nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let mut id = None;
        let mut classes = Vec::new();

        for attr in &attrs {
            match attr.name.local.as_ref() {
                "id" => id = Some(attr.value.clone()),
                "class" => classes = split_classes(&attr.value),
                _ => {}
            }
        }

        self.alloc(Node::new(NodeData::Element {
            name,
            attrs,
            id,
            classes,
        }))
    }

    /// Create a detached HTML element with the given attributes.
    pub fn create_html_element(&mut self, local: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: attr_qualname(name),
                value: (*value).to_string(),
            })
            .collect();
        self.create_element(html_name(local), attrs)
    }

    /// Create an HTML element and append it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        local: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let id = self.create_html_element(local, attrs);
        self.append(parent, id);
        id
    }

    pub fn create_text(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Text(text)))
    }

    pub fn create_comment(&mut self, text: String) -> NodeId {
        self.alloc(Node::new(NodeData::Comment(text)))
    }

    pub fn create_doctype(&mut self, name: String, public_id: String, system_id: String) -> NodeId {
        self.alloc(Node::new(NodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Contents fragment of a `<template>` element.
    pub fn template_contents(&self, template: NodeId) -> Option<NodeId> {
        self.templates.get(&template).copied()
    }

    /// Contents fragment of `template`, allocated on first use.
    pub(crate) fn ensure_template_contents(&mut self, template: NodeId) -> NodeId {
        if let Some(&fragment) = self.templates.get(&template) {
            return fragment;
        }
        let fragment = self.alloc(Node::new(NodeData::Fragment));
        self.templates.insert(template, fragment);
        fragment
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to the last child if it is a text node, otherwise add one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let NodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings.
    pub fn detach(&mut self, target: NodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        ChildrenIter {
            doc: self,
            current: first,
        }
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_some())
    }

    /// All descendants of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let first = stack.len();
            stack.extend(self.children(id));
            stack[first..].reverse();
        }
        out
    }

    /// Check whether `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Find the first node matching a predicate (DFS from the root).
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        std::iter::once(self.document)
            .chain(self.descendants(self.document))
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| match &node.data {
            NodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }

    /// First attached element carrying the given `id`, in document order.
    ///
    /// Walks the tree; callers probing many ids should take
    /// [`Document::element_ids`] once instead.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.document)
            .into_iter()
            .find(|&node| self.element_id(node) == Some(id))
    }

    /// Every non-empty `id` carried by an attached element.
    pub fn element_ids(&self) -> HashSet<String> {
        self.descendants(self.document)
            .into_iter()
            .filter_map(|node| self.element_id(node))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The element holding input focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move input focus to an element.
    pub fn focus(&mut self, id: NodeId) {
        if self.is_element(id) {
            self.focused = Some(id);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Element accessors and attribute mutation.
impl Document {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    pub fn element_namespace(&self, id: NodeId) -> Option<&Namespace> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.ns),
            _ => None,
        })
    }

    /// Check the element's tag name.
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.element_name(id).is_some_and(|n| n.as_ref() == tag)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    pub fn has_attr(&self, id: NodeId, attr_name: &str) -> bool {
        self.get_attr(id, attr_name).is_some()
    }

    /// Set or replace an attribute, keeping the parsed id and classes current.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: &str) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let NodeData::Element {
            attrs,
            id: parsed_id,
            classes,
            ..
        } = &mut node.data
        else {
            return;
        };

        match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
            Some(attr) => attr.value = value.to_string(),
            None => attrs.push(Attribute {
                name: attr_qualname(attr_name),
                value: value.to_string(),
            }),
        }

        match attr_name {
            "id" => *parsed_id = Some(value.to_string()),
            "class" => *classes = split_classes(value),
            _ => {}
        }
    }

    /// Get element's id attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { id, .. } => id.as_deref(),
            _ => None,
        })
    }

    /// Get element's classes.
    pub fn element_classes(&self, id: NodeId) -> &[String] {
        static EMPTY: &[String] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { classes, .. } => Some(classes.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element_classes(id).iter().any(|c| c == class)
    }

    /// Add a class token; no-op when already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.is_element(id) || self.has_class(id, class) {
            return;
        }
        let mut tokens = self.element_classes(id).to_vec();
        tokens.push(class.to_string());
        self.set_attr(id, "class", &tokens.join(" "));
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(|n| matches!(n.data, NodeData::Text(_)))
    }

    /// Get the content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of every descendant text node (`textContent`).
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Replace all children with a single text node (nothing for "").
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let children: Vec<_> = self.children(id).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text.to_string());
            self.append(id, node);
        }
    }
}

/// Build a QualName in the HTML namespace.
pub(crate) fn html_name(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

/// Build an attribute QualName with no namespace.
fn attr_qualname(local: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(local))
}

fn split_classes(value: &str) -> Vec<String> {
    value.split_whitespace().map(|s| s.to_string()).collect()
}
