//! Compiled CSS selector lists and scoped queries.

use std::fmt;

use selectors::context::{MatchingContext, QuirksMode, SelectorCaches};
use selectors::matching::{
    MatchingForInvalidation, MatchingMode, NeedsSelectorFlags, matches_selector,
};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use super::arena::{Document, NodeId};
use super::element_ref::{ElementRef, PageSelectors};
use crate::error::{Error, Result};

/// A parsed, comma-separated selector list such as `section, .card, .alert`.
#[derive(Clone)]
pub struct SelectorSet {
    source: String,
    selectors: Vec<Selector<PageSelectors>>,
}

impl SelectorSet {
    /// Parse a selector list, rejecting anything the matcher cannot evaluate.
    pub fn parse(source: &str) -> Result<Self> {
        let mut input = cssparser::ParserInput::new(source);
        let mut parser = cssparser::Parser::new(&mut input);
        let list = SelectorList::parse(&PageSelectors, &mut parser, ParseRelative::No)
            .map_err(|e| Error::InvalidSelector {
                selector: source.to_string(),
                reason: format!("{:?}", e.kind),
            })?;

        Ok(Self {
            source: source.to_string(),
            selectors: list.slice().to_vec(),
        })
    }

    /// The selector text this set was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether an element matches any selector in the set.
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.matches_with(doc, id, &mut SelectorCaches::default())
    }

    /// Match with caches shared across the elements of one query.
    fn matches_with(&self, doc: &Document, id: NodeId, caches: &mut SelectorCaches) -> bool {
        if !doc.is_element(id) {
            return false;
        }
        let element = ElementRef::new(doc, id);
        let mut context = MatchingContext::new(
            MatchingMode::Normal,
            None,
            caches,
            QuirksMode::NoQuirks,
            NeedsSelectorFlags::No,
            MatchingForInvalidation::No,
        );
        self.selectors
            .iter()
            .any(|selector| matches_selector(selector, 0, None, &element, &mut context))
    }
}

impl fmt::Debug for SelectorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorSet").field(&self.source).finish()
    }
}

/// Scoped queries, mirroring `querySelectorAll`, `querySelector` and `closest`.
impl Document {
    /// Every descendant of `scope` matching the set, in document order.
    pub fn select_all(&self, scope: NodeId, selectors: &SelectorSet) -> Vec<NodeId> {
        let mut caches = SelectorCaches::default();
        self.descendants(scope)
            .into_iter()
            .filter(|&id| selectors.matches_with(self, id, &mut caches))
            .collect()
    }

    /// First descendant of `scope` matching the set.
    pub fn select_first(&self, scope: NodeId, selectors: &SelectorSet) -> Option<NodeId> {
        let mut caches = SelectorCaches::default();
        self.descendants(scope)
            .into_iter()
            .find(|&id| selectors.matches_with(self, id, &mut caches))
    }

    /// Nearest inclusive ancestor matching the set.
    pub fn closest(&self, id: NodeId, selectors: &SelectorSet) -> Option<NodeId> {
        let mut caches = SelectorCaches::default();
        let mut current = Some(id);
        while let Some(node) = current {
            if selectors.matches_with(self, node, &mut caches) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }
}
