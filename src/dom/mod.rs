//! Page document model.
//!
//! Server-rendered markup is parsed with html5ever into an arena-backed
//! [`Document`], queried with CSS selectors, mutated by the enhancement
//! components, and serialized back to HTML with html5ever when needed.
//!
//! ```
//! use lucent::dom::{SelectorSet, parse_html};
//!
//! let doc = parse_html(r#"<main><section id="intro">Hi</section></main>"#);
//! let main = doc.find_by_tag("main").unwrap();
//! let sections = SelectorSet::parse("section").unwrap();
//! assert_eq!(doc.select_all(main, &sections).len(), 1);
//! ```

mod arena;
mod element_ref;
mod query;
mod serialize;
mod style;
mod tree_sink;

pub use arena::{Attribute, ChildrenIter, Document, Node, NodeData, NodeId};
pub use element_ref::{ElementRef, PageSelectors};
pub use query::SelectorSet;
pub use serialize::{SerializableNode, outer_html, to_html};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DocumentSink;

/// Parse an HTML document.
pub fn parse_html(html: &str) -> Document {
    parse_document(DocumentSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_document()
}

/// Parse HTML bytes, sniffing the character encoding first.
///
/// UTF-8 is tried first; a `<meta charset>` declaration is honored next, and
/// Windows-1252 is the last resort.
pub fn parse_html_bytes(html: &[u8]) -> Document {
    let hint = crate::util::sniff_meta_charset(html);
    let text = crate::util::decode_text(html, hint);
    parse_html(&text)
}
