// src/convert/mod.rs
//! Element converters for the FO vocabulary and the standard dispatch table.

pub mod block;
pub mod inline;
pub mod list;
pub mod table;

pub use block::BlockConverter;
pub use inline::InlineConverter;
pub use list::ListConverter;
pub use table::TableConverter;

use crate::keep;
use crate::traverse::{Converted, ConverterRegistry};
use crate::whitespace::normalize;
use folio_idf::{
    Block, BlockProps, Cell, ContentNode, PaddingCallbacks, Stack, Table, TableLayout,
    TableModel, minimize_block, minimize_span,
};
use folio_style::{BoxStyle, ColumnWidth, TextStyle};
use folio_types::Element;
use std::sync::Arc;

/// Elements whose subtrees never reach the body content.
pub const SKIPPED_TAGS: [&str; 3] = ["static-content", "layout-master-set", "declarations"];

/// The converters for block, inline, link, table and list elements.
pub fn standard_registry() -> ConverterRegistry {
    let mut registry = ConverterRegistry::new();
    registry.register("block", Arc::new(BlockConverter));
    let inline = Arc::new(InlineConverter);
    for tag in ["inline", "basic-link", "wrapper"] {
        registry.register(tag, inline.clone());
    }
    registry.register("table", Arc::new(TableConverter));
    registry.register("list-block", Arc::new(ListConverter));
    for tag in SKIPPED_TAGS {
        registry.skip(tag);
    }
    registry
}

/// Whether the element asks for its whitespace to be kept verbatim.
pub(crate) fn preserves_whitespace(element: &Element) -> bool {
    let is = |name: &str, values: &[&str]| {
        element
            .attr(name)
            .is_some_and(|v| values.contains(&v.trim().to_lowercase().as_str()))
    };
    is("linefeed-treatment", &["preserve"])
        || is("white-space-treatment", &["preserve"])
        || is("white-space-collapse", &["false"])
        || is("white-space", &["pre", "pre-wrap", "pre-line"])
}

/// Content of a block or inline, ready to wrap.
pub(crate) struct Prepared {
    pub nodes: Vec<ContentNode>,
    /// The children were separate blocks and must stack rather than flow.
    pub stacked: bool,
}

/// Turns converted children into the content list of a block or inline.
///
/// Keep groups are formed when any child came from a block-level element; inline
/// content simply loses its markers. Whitespace is normalized unless the element
/// preserves it, an empty element becomes a single line-break marker, and text next to
/// objects is re-wrapped with the element's style.
pub(crate) fn prepare_content(
    element: &Element,
    children: Vec<Converted>,
    style: &TextStyle,
) -> Prepared {
    let stacked = children.iter().any(|c| c.block_level);
    let nodes = if stacked {
        keep::group(children)
    } else {
        keep::strip(children)
    };
    let nodes = if preserves_whitespace(element) {
        nodes
    } else {
        normalize(nodes)
    };
    if nodes.is_empty() {
        return Prepared {
            nodes: vec![ContentNode::line_break()],
            stacked: false,
        };
    }
    Prepared {
        nodes: merge_children(nodes, style),
        stacked,
    }
}

/// Content of a container that holds its children without styling them (a table cell,
/// a list item body). Several block children stack; inline children flow together.
pub(crate) fn container_content(mut items: Vec<Converted>) -> Option<ContentNode> {
    match items.len() {
        0 => None,
        1 => items.pop().map(Converted::into_content),
        _ if items.iter().any(|c| c.block_level) => Some(ContentNode::Stack(Stack {
            stack: keep::group(items),
            unbreakable: false,
        })),
        _ => Some(minimize_block(Block {
            content: keep::strip(items),
            ..Default::default()
        })),
    }
}

/// Wraps content in a single-cell table carrying the border and padding, since the
/// renderer only draws borders around table cells.
///
/// Padding becomes the cell's inner margin and the background its fill. The outer
/// margin and box properties stay on the wrapper. Edge callbacks are indexed
/// 0 = top/left and 1 = bottom/right.
pub(crate) fn boxed(
    content: Prepared,
    mut style: TextStyle,
    box_style: &BoxStyle,
    props: BlockProps,
) -> ContentNode {
    let borders = &box_style.borders;
    let fill_color = style.background.take();
    let inner = minimize_block(Block {
        content: content.nodes,
        stacked: content.stacked,
        ..Default::default()
    });
    let cell = Cell {
        content: Some(Box::new(inner)),
        col_span: 1,
        border: Some(borders.flags()),
        fill_color,
        margin: box_style.padding,
        style,
    };
    let layout = TableLayout::from_edges(
        1,
        1,
        vec![borders.top.resolved_width(), borders.bottom.resolved_width()],
        vec![borders.left.resolved_width(), borders.right.resolved_width()],
        vec![borders.top.color.clone(), borders.bottom.color.clone()],
        vec![borders.left.color.clone(), borders.right.color.clone()],
    )
    .with_padding(PaddingCallbacks::zero());

    ContentNode::Table(Box::new(Table {
        table: TableModel {
            widths: vec![ColumnWidth::Star],
            body: vec![vec![ContentNode::Cell(cell)]],
            header_rows: 0,
        },
        layout: Some(layout),
        style: TextStyle::default(),
        props,
    }))
}

/// When any child is an object, every plain text sibling is re-wrapped as a span with
/// the parent's style so it renders like its styled neighbours. Markers stay bare.
pub(crate) fn merge_children(children: Vec<ContentNode>, style: &TextStyle) -> Vec<ContentNode> {
    if children.iter().all(ContentNode::is_text) {
        return children;
    }
    children
        .into_iter()
        .map(|child| match child {
            ContentNode::Text(t) if t != folio_idf::LINE_BREAK => {
                minimize_span(vec![ContentNode::Text(t)], style.clone())
            }
            other => other,
        })
        .collect()
}

pub(crate) fn block_props(element: &Element, box_style: &BoxStyle) -> BlockProps {
    BlockProps {
        margin: box_style.margin,
        page_break: box_style.page_break,
        unbreakable: box_style.keep.together,
        id: element.attr("id").map(str::to_string),
    }
}
