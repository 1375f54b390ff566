// src/convert/inline.rs
use super::{Prepared, block_props, boxed, prepare_content};
use crate::error::ConvertError;
use crate::traverse::{Converted, ElementConverter, Traversal};
use folio_idf::{ContentNode, Span, minimize_span};
use folio_style::{BoxStyle, TextStyle};
use folio_types::Element;

/// Converts `inline`, `wrapper` and `basic-link` elements into styled spans.
///
/// An inline with borders or padding cannot be drawn as text and is boxed like a block;
/// its link, if any, stays on the text inside the box.
pub struct InlineConverter;

impl ElementConverter for InlineConverter {
    fn convert(
        &self,
        element: &Element,
        children: Vec<Converted>,
        traversal: &Traversal<'_>,
    ) -> Result<Option<Converted>, ConvertError> {
        let attrs = &element.attributes;
        let ctx = traversal.context();
        let style = TextStyle::resolve(attrs, ctx);
        let box_style = BoxStyle::resolve(attrs, ctx.descend(attrs).em_basis());
        let content = prepare_content(element, children, &style);

        let link = element.attr("external-destination").map(unwrap_url);
        let link_to_destination = element
            .attr("internal-destination")
            .map(|d| d.trim().to_string());
        let linked = link.is_some() || link_to_destination.is_some();

        if box_style.has_decoration() {
            let content = if linked {
                Prepared {
                    nodes: vec![ContentNode::Span(Span {
                        text: content.nodes,
                        style: TextStyle::default(),
                        link,
                        link_to_destination,
                    })],
                    stacked: false,
                }
            } else {
                content
            };
            let node = boxed(content, style, &box_style, block_props(element, &box_style));
            return Ok(Some(Converted::new(node)));
        }

        let node = if linked {
            ContentNode::Span(Span {
                text: content.nodes,
                style,
                link,
                link_to_destination,
            })
        } else {
            minimize_span(content.nodes, style)
        };
        Ok(Some(Converted::new(node)))
    }
}

/// `url('x')`, `url("x")` and `url(x)` all yield `x`; anything else is taken as is.
fn unwrap_url(value: &str) -> String {
    let value = value.trim();
    let inner = value
        .strip_prefix("url(")
        .and_then(|v| v.strip_suffix(')'))
        .map(str::trim)
        .unwrap_or(value);
    inner
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
        .unwrap_or(inner)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompileOptions;
    use crate::convert::standard_registry;
    use folio_style::TextDecoration;
    use folio_types::SourceNode;

    fn convert(node: SourceNode) -> ContentNode {
        let registry = standard_registry();
        let options = CompileOptions::default();
        Traversal::new(&registry, &options)
            .traverse(&node)
            .unwrap()
            .unwrap()
            .content
    }

    #[test]
    fn test_unwrap_url() {
        assert_eq!(unwrap_url("url('http://a.b')"), "http://a.b");
        assert_eq!(unwrap_url("url(\"x\")"), "x");
        assert_eq!(unwrap_url(" url(y) "), "y");
        assert_eq!(unwrap_url("http://plain"), "http://plain");
    }

    #[test]
    fn test_styled_inline() {
        let out = convert(
            Element::new("inline")
                .with_attr("text-decoration", "underline")
                .with_child("u")
                .into(),
        );
        let ContentNode::Span(span) = out else {
            panic!("expected a span");
        };
        assert_eq!(span.text, vec![ContentNode::text("u")]);
        assert_eq!(span.style.decoration, Some(TextDecoration::Underline));
    }

    #[test]
    fn test_unstyled_inline_is_text() {
        let out = convert(Element::new("inline").with_child(" plain ").into());
        assert_eq!(out, ContentNode::text("plain"));
    }

    #[test]
    fn test_links() {
        let external = convert(
            Element::new("basic-link")
                .with_attr("external-destination", "url('https://example.com')")
                .with_child("site")
                .into(),
        );
        let ContentNode::Span(span) = external else {
            panic!("expected a span");
        };
        assert_eq!(span.link.as_deref(), Some("https://example.com"));

        let internal = convert(
            Element::new("basic-link")
                .with_attr("internal-destination", "sec-2")
                .with_child("see")
                .into(),
        );
        let ContentNode::Span(span) = internal else {
            panic!("expected a span");
        };
        assert_eq!(span.link_to_destination.as_deref(), Some("sec-2"));
        assert!(span.style.is_empty());
    }

    #[test]
    fn test_adjacent_inlines_get_one_space() {
        let out = convert(
            Element::new("block")
                .with_child(Element::new("inline").with_attr("font-weight", "bold").with_child("a"))
                .with_child(Element::new("inline").with_attr("font-style", "italic").with_child("b"))
                .into(),
        );
        let ContentNode::Block(block) = out else {
            panic!("expected a block");
        };
        assert_eq!(block.content.len(), 3);
        assert_eq!(block.content[1], ContentNode::text(" "));
    }

    #[test]
    fn test_bordered_inline_is_boxed() {
        let out = convert(
            Element::new("inline")
                .with_attr("border", "1pt solid red")
                .with_attr("padding", "2pt")
                .with_attr("font-weight", "bold")
                .with_child("boxed")
                .into(),
        );
        let ContentNode::Table(table) = out else {
            panic!("expected a one-cell table");
        };
        let layout = table.layout.as_ref().unwrap();
        assert_eq!(layout.h_line_widths(), vec![1.0, 1.0]);
        let ContentNode::Cell(cell) = &table.table.body[0][0] else {
            panic!("expected a cell");
        };
        assert_eq!(cell.border, Some([true, true, true, true]));
        assert_eq!(cell.style.bold, Some(true));
        assert_eq!(cell.content.as_deref(), Some(&ContentNode::text("boxed")));
    }

    #[test]
    fn test_boxed_link_keeps_its_target() {
        let out = convert(
            Element::new("basic-link")
                .with_attr("external-destination", "url(https://example.com)")
                .with_attr("padding", "1pt")
                .with_child("go")
                .into(),
        );
        let ContentNode::Table(table) = out else {
            panic!("expected a one-cell table");
        };
        let ContentNode::Cell(cell) = &table.table.body[0][0] else {
            panic!("expected a cell");
        };
        let Some(ContentNode::Block(inner)) = cell.content.as_deref() else {
            panic!("expected the linked text inside the box");
        };
        let ContentNode::Span(span) = &inner.content[0] else {
            panic!("expected a linked span");
        };
        assert_eq!(span.link.as_deref(), Some("https://example.com"));
    }
}
