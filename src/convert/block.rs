// src/convert/block.rs
use super::{block_props, boxed, prepare_content};
use crate::error::ConvertError;
use crate::traverse::{Converted, ElementConverter, Traversal};
use folio_idf::{Block, minimize_block};
use folio_style::{BoxStyle, TextStyle};
use folio_types::Element;

/// Converts `block` elements.
///
/// A block that declares borders or padding is emitted as a one-cell table. The result
/// is block-level even when it minimizes to bare text, except for the line-break marker
/// an empty block stands for.
pub struct BlockConverter;

impl ElementConverter for BlockConverter {
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
        let props = block_props(element, &box_style);

        let node = if box_style.has_decoration() {
            boxed(content, style, &box_style, props)
        } else {
            minimize_block(Block {
                content: content.nodes,
                style,
                props,
                stacked: content.stacked,
            })
        };
        let block_level = !node.is_line_break();
        Ok(Some(
            Converted::new(node)
                .with_keeps(box_style.keep.with_previous, box_style.keep.with_next)
                .with_block_level(block_level),
        ))
    }
}
