//! Inline `style` attribute access.
//!
//! The attribute is tokenized with cssparser, so semicolons and colons inside
//! strings, `url(...)` and nested functions stay part of their value. Values
//! are kept as the author wrote them, sliced from the source text.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};

use super::arena::{Document, NodeId};

/// One `name: value` pair; the name is lowercased.
type StyleDeclaration = (String, String);

/// Inline `style` attribute access.
impl Document {
    /// Read one declaration from the element's inline style.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.get_attr(id, "style")?;
        parse_inline_style(style)
            .into_iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set one declaration, replacing an earlier value for the same property.
    ///
    /// Other declarations keep their source text. Ones that fail to parse are
    /// dropped, as a browser would drop them from `element.style`.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let mut decls = self
            .get_attr(id, "style")
            .map(parse_inline_style)
            .unwrap_or_default();
        decls.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        decls.push((property.to_ascii_lowercase(), value.to_string()));
        self.set_attr(id, "style", &write_inline_style(&decls));
    }
}

/// Parse a `style` attribute into declarations, skipping invalid ones.
pub(crate) fn parse_inline_style(style: &str) -> Vec<StyleDeclaration> {
    let mut source = ParserInput::new(style);
    let mut input = Parser::new(&mut source);
    let mut parser = InlineStyleParser;

    RuleBodyParser::new(&mut input, &mut parser)
        .filter_map(Result::ok)
        .collect()
}

fn write_inline_style(decls: &[StyleDeclaration]) -> String {
    let mut css = String::new();
    for (name, value) in decls {
        if !css.is_empty() {
            css.push(' ');
        }
        css.push_str(name);
        css.push_str(": ");
        css.push_str(value);
        css.push(';');
    }
    css
}

struct InlineStyleParser;

impl<'i> DeclarationParser<'i> for InlineStyleParser {
    type Declaration = StyleDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        // Nested blocks are skipped as a whole by the next call.
        while input.next_including_whitespace_and_comments().is_ok() {}

        let value = input.slice_from(start).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok((name.to_ascii_lowercase(), value.to_string()))
    }
}

impl<'i> AtRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type AtRule = StyleDeclaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type QualifiedRule = StyleDeclaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, StyleDeclaration, ()> for InlineStyleParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(style: &str) -> Vec<(String, String)> {
        parse_inline_style(style)
    }

    #[test]
    fn test_simple_declarations() {
        assert_eq!(
            decls("opacity: 0; VISIBILITY:hidden"),
            vec![
                ("opacity".to_string(), "0".to_string()),
                ("visibility".to_string(), "hidden".to_string()),
            ]
        );
    }

    #[test]
    fn test_semicolons_inside_values() {
        let parsed = decls(
            r#"background: url('data:image/png;base64,AAAA'); content: "a;b"; mask: url(data:x;y)"#,
        );
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].1, "url('data:image/png;base64,AAAA')");
        assert_eq!(parsed[1].1, r#""a;b""#);
        assert_eq!(parsed[2].1, "url(data:x;y)");
    }

    #[test]
    fn test_invalid_declarations_are_skipped() {
        let parsed = decls("color:; : red; width 10px; height: 2px");
        assert_eq!(parsed, vec![("height".to_string(), "2px".to_string())]);
    }

    #[test]
    fn test_nested_functions_and_important() {
        let parsed = decls("width: calc(100% - var(--gap, 1px)) !important");
        assert_eq!(parsed[0].1, "calc(100% - var(--gap, 1px)) !important");
    }

    #[test]
    fn test_set_style_property_keeps_other_values() {
        let mut doc = Document::new();
        let div = doc.append_element(
            doc.document(),
            "div",
            &[("style", "background: url('a;b.png'); opacity: 0; visibility: hidden")],
        );

        assert_eq!(doc.style_property(div, "visibility").as_deref(), Some("hidden"));

        doc.set_style_property(div, "visibility", "visible");
        doc.set_style_property(div, "display", "block");

        assert_eq!(
            doc.get_attr(div, "style"),
            Some("background: url('a;b.png'); opacity: 0; visibility: visible; display: block;")
        );
        assert_eq!(doc.style_property(div, "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn test_missing_style_attribute() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.document(), "div", &[]);
        assert_eq!(doc.style_property(div, "display"), None);

        doc.set_style_property(div, "display", "none");
        assert_eq!(doc.get_attr(div, "style"), Some("display: none;"));
    }
}
