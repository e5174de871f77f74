//! # lucent
//!
//! Progressive enhancement for server-rendered article pages.
//!
//! The page works without any of this. When its markup is handed to an
//! [`Enhancer`], each enhancement checks its own preconditions and either
//! wires itself up or stays out of the way:
//!
//! - smooth in-page anchor navigation with history and focus management
//! - a floating return-to-top control shown past a scroll threshold
//! - a reading-progress bar mirroring scroll position
//! - an image overlay viewer for captioned figures
//! - one-shot entrance animation of content blocks
//! - keyboard navigation and ARIA linkage for collapsible panels
//! - activation of framework tooltips and popovers
//!
//! ## Quick Start
//!
//! ```
//! use lucent::dom::{parse_html, to_html};
//! use lucent::{EnhanceConfig, Enhancer, HeadlessHost};
//!
//! let mut doc = parse_html("<main><section><p>Text</p></section></main>");
//! let mut host = HeadlessHost::new();
//! let enhancer = Enhancer::bootstrap(&mut doc, &mut host, EnhanceConfig::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(enhancer.report().animated_blocks, 1);
//! assert!(to_html(&doc).contains("back-to-top"));
//! ```
//!
//! ## Hosts
//!
//! Everything outside the document (scrolling, layout metrics, history and
//! the UI framework's primitives) is reached through the [`Host`] trait.
//! [`HeadlessHost`] is an in-memory implementation used by the CLI, the
//! wasm bindings and tests.

pub mod config;
pub mod dom;
pub mod enhance;
pub mod error;
pub mod host;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{CompiledSelectors, EnhanceConfig, IdVocabulary, SelectorConfig, Strings};
pub use enhance::{EnhancementReport, Enhancer, Event, IntersectionEntry, Key, Outcome};
pub use error::{Error, Result};
pub use host::{HeadlessHost, Host, ScrollInstruction, WidgetKind};

/// Parse `html`, enhance it against a [`HeadlessHost`] and return the report
/// together with the enhanced markup.
///
/// The report is `None` when the page has no content root; the markup is
/// then returned unchanged apart from serialization.
pub fn enhance_html(html: &str, config: EnhanceConfig) -> Result<(Option<EnhancementReport>, String)> {
    let mut doc = dom::parse_html(html);
    let mut host = HeadlessHost::new();
    let report = Enhancer::bootstrap(&mut doc, &mut host, config)?.map(|e| e.report());
    Ok((report, dom::to_html(&doc)))
}
