// src/convert/list.rs
use super::{block_props, container_content};
use crate::error::ConvertError;
use crate::traverse::{Converted, ElementConverter, Traversal};
use folio_idf::{ContentNode, ListModel};
use folio_style::{BoxStyle, TextStyle};
use folio_types::Element;
use log::debug;

/// Converts `list-block` elements. Items are the converted `list-item-body` contents;
/// labels only decide whether the list is numbered.
pub struct ListConverter;

impl ElementConverter for ListConverter {
    fn descends(&self, _element: &Element) -> bool {
        false
    }

    fn convert(
        &self,
        element: &Element,
        _children: Vec<Converted>,
        traversal: &Traversal<'_>,
    ) -> Result<Option<Converted>, ConvertError> {
        let attrs = &element.attributes;
        let ctx = traversal.context();
        let inner = traversal.descend(element);

        let mut items = Vec::new();
        let mut first_label: Option<String> = None;
        for item in element.child_elements().filter(|e| e.tag == "list-item") {
            let item_traversal = inner.descend(item);
            if first_label.is_none() {
                first_label = item
                    .child_elements()
                    .find(|e| e.tag == "list-item-label")
                    .map(|label| label.text_content().trim().to_string())
                    .filter(|label| !label.is_empty());
            }
            let Some(body) = item.child_elements().find(|e| e.tag == "list-item-body") else {
                debug!("Skipping <list-item> without a body");
                continue;
            };
            if let Some(content) = container_content(item_traversal.convert_children(body)?) {
                items.push(content);
            }
        }
        if items.is_empty() {
            debug!("Skipping empty <list-block>");
            return Ok(None);
        }

        let box_style = BoxStyle::resolve(attrs, ctx.descend(attrs).em_basis());
        let list = ListModel {
            ordered: first_label.as_deref().is_some_and(is_ordered_label),
            items,
            style: TextStyle::resolve(attrs, ctx),
            props: block_props(element, &box_style),
        };
        Ok(Some(Converted::new(ContentNode::List(list)).with_keeps(
            box_style.keep.with_previous,
            box_style.keep.with_next,
        )))
    }
}

/// Counters such as `1`, `2.`, `a)`, `iv.` or `(b)` mark a numbered list; bullets do not.
pub fn is_ordered_label(label: &str) -> bool {
    let label = label.trim();
    if label.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    let Some(counter) = label
        .strip_suffix('.')
        .or_else(|| label.strip_suffix(')'))
    else {
        return false;
    };
    let counter = counter.strip_prefix('(').unwrap_or(counter);
    !counter.is_empty() && counter.len() <= 4 && counter.chars().all(|c| c.is_ascii_alphabetic())
}
