//! Intermediate Document Format (IDF)
//! This crate defines the declarative content model the compiler emits and an external,
//! paginating renderer consumes. It serializes to a pdfmake-like JSON document
//! definition.

pub mod layout;

pub use layout::{EdgeFn, PaddingCallbacks, TableLayout};

use folio_style::{ColumnWidth, Margins, PageBreak, TextStyle};
use folio_types::Color;
use serde::{Serialize, Serializer};

/// Literal line-break marker produced by self-closing blocks.
pub const LINE_BREAK: &str = "\n";

/// Box-level properties carried by block nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_break: Option<PageBreak>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unbreakable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl BlockProps {
    pub fn is_empty(&self) -> bool {
        *self == BlockProps::default()
    }
}

/// An inline run with a style, e.g. a converted `inline` or a text sibling re-wrapped
/// with its parent's style.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(serialize_with = "serialize_content")]
    pub text: Vec<ContentNode>,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_to_destination: Option<String>,
}

/// A paragraph-level node. The renderer stacks the content vertically when it came
/// from block-level source elements or holds block-level nodes, otherwise it flows as
/// one paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub content: Vec<ContentNode>,
    pub style: TextStyle,
    pub props: BlockProps,
    /// Set when the content items are separate blocks, even if each one minimized to
    /// bare text.
    pub stacked: bool,
}

impl Block {
    pub fn is_stacked(&self) -> bool {
        self.stacked || self.content.iter().any(ContentNode::is_block_level)
    }
}

/// A table cell that carries more than bare content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// `None` only for span placeholders.
    pub content: Option<Box<ContentNode>>,
    pub col_span: usize,
    /// Drawn flags in `[left, top, right, bottom]` order.
    pub border: Option<[bool; 4]>,
    pub fill_color: Option<Color>,
    /// Inner spacing from the cell's padding.
    pub margin: Option<Margins>,
    pub style: TextStyle,
}

fn is_one(n: &usize) -> bool {
    *n == 1
}

impl Cell {
    pub fn new(content: ContentNode) -> Self {
        Self {
            content: Some(Box::new(content)),
            col_span: 1,
            ..Default::default()
        }
    }

    /// The empty cell standing in for a column covered by a preceding span.
    pub fn placeholder() -> Self {
        Self {
            col_span: 1,
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.content.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableModel {
    pub widths: Vec<ColumnWidth>,
    /// Row-major cell matrix.
    pub body: Vec<Vec<ContentNode>>,
    #[serde(skip_serializing_if = "is_zero")]
    pub header_rows: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl TableModel {
    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    pub fn row_count(&self) -> usize {
        self.body.len()
    }
}

/// A table plus the wrapper-level properties and draw callbacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table: TableModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<TableLayout>,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(flatten)]
    pub props: BlockProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub stack: Vec<ContentNode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unbreakable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListModel {
    pub ordered: bool,
    pub items: Vec<ContentNode>,
    pub style: TextStyle,
    pub props: BlockProps,
}

/// One item of the output document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Text(String),
    Span(Span),
    Block(Block),
    Table(Box<Table>),
    Cell(Cell),
    Stack(Stack),
    List(ListModel),
}

impl ContentNode {
    pub fn text(s: impl Into<String>) -> Self {
        ContentNode::Text(s.into())
    }

    pub fn line_break() -> Self {
        ContentNode::Text(LINE_BREAK.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentNode::Text(_))
    }

    pub fn is_line_break(&self) -> bool {
        self.as_text() == Some(LINE_BREAK)
    }

    /// Nodes that occupy their own vertical slot rather than flowing inline.
    pub fn is_block_level(&self) -> bool {
        matches!(
            self,
            ContentNode::Block(_) | ContentNode::Table(_) | ContentNode::Stack(_) | ContentNode::List(_)
        )
    }

    /// Sets the unbreakable flag on nodes that support it. Returns whether it was set.
    pub fn set_unbreakable(&mut self) -> bool {
        match self {
            ContentNode::Block(b) => b.props.unbreakable = true,
            ContentNode::Table(t) => t.props.unbreakable = true,
            ContentNode::List(l) => l.props.unbreakable = true,
            ContentNode::Stack(s) => s.unbreakable = true,
            ContentNode::Text(_) | ContentNode::Span(_) | ContentNode::Cell(_) => return false,
        }
        true
    }
}

/// Collapses a styled text run to bare text when it carries no style.
///
/// This is the single place where the plain/styled decision is made.
pub fn minimize_span(content: Vec<ContentNode>, style: TextStyle) -> ContentNode {
    if style.is_empty() {
        return match single_text(content) {
            Ok(text) => ContentNode::Text(text),
            Err(content) => ContentNode::Span(Span {
                text: content,
                style,
                link: None,
                link_to_destination: None,
            }),
        };
    }
    ContentNode::Span(Span {
        text: content,
        style,
        link: None,
        link_to_destination: None,
    })
}

/// Collapses a block that carries neither style nor box properties: a single text run
/// becomes bare text and a single block-level node stands for the block itself.
pub fn minimize_block(block: Block) -> ContentNode {
    if !block.style.is_empty() || !block.props.is_empty() {
        return ContentNode::Block(block);
    }
    let mut content = match single_text(block.content) {
        Ok(text) => return ContentNode::Text(text),
        Err(content) => content,
    };
    if content.len() == 1 && content[0].is_block_level() {
        if let Some(node) = content.pop() {
            return node;
        }
    }
    ContentNode::Block(Block { content, ..block })
}

fn single_text(mut content: Vec<ContentNode>) -> Result<String, Vec<ContentNode>> {
    if content.len() == 1 && content[0].is_text() {
        if let Some(ContentNode::Text(t)) = content.pop() {
            return Ok(t);
        }
    }
    Err(content)
}

impl Serialize for ContentNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ContentNode::Text(t) => serializer.serialize_str(t),
            ContentNode::Span(s) => s.serialize(serializer),
            ContentNode::Block(b) => b.serialize(serializer),
            ContentNode::Table(t) => t.serialize(serializer),
            ContentNode::Cell(c) => c.serialize(serializer),
            ContentNode::Stack(s) => s.serialize(serializer),
            ContentNode::List(l) => l.serialize(serializer),
        }
    }
}

/// Serialized shape shared by nodes that hold either flowing text or stacked content.
#[derive(Serialize)]
struct ContentRepr<'a, P: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<Flow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a [ContentNode]>,
    #[serde(flatten)]
    style: &'a TextStyle,
    #[serde(flatten)]
    props: P,
}

impl<'a, P: Serialize> ContentRepr<'a, P> {
    fn new(content: &'a [ContentNode], stacked: bool, style: &'a TextStyle, props: P) -> Self {
        let (text, stack) = if stacked {
            (None, Some(content))
        } else {
            (Some(Flow(content)), None)
        };
        Self {
            text,
            stack,
            style,
            props,
        }
    }
}

/// A single text run serializes as a bare string, anything else as an array.
struct Flow<'a>(&'a [ContentNode]);

impl Serialize for Flow<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_content(self.0, serializer)
    }
}

fn serialize_content<S>(content: &[ContentNode], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match content {
        [ContentNode::Text(t)] => serializer.serialize_str(t),
        items => items.serialize(serializer),
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ContentRepr::new(&self.content, self.is_stacked(), &self.style, &self.props)
            .serialize(serializer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CellProps<'a> {
    #[serde(skip_serializing_if = "is_one")]
    col_span: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    border: Option<[bool; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill_color: Option<&'a Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    margin: Option<Margins>,
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let content = self.content.as_deref().map(std::slice::from_ref).unwrap_or(&[]);
        let props = CellProps {
            col_span: self.col_span,
            border: self.border,
            fill_color: self.fill_color.as_ref(),
            margin: self.margin,
        };
        let stacked = content.iter().any(ContentNode::is_block_level);
        if content.is_empty() {
            let empty = ContentRepr::<CellProps> {
                text: None,
                stack: None,
                style: &self.style,
                props,
            };
            return empty.serialize(serializer);
        }
        ContentRepr::new(content, stacked, &self.style, props).serialize(serializer)
    }
}

#[derive(Serialize)]
struct ListRepr<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ol: Option<&'a [ContentNode]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ul: Option<&'a [ContentNode]>,
    #[serde(flatten)]
    style: &'a TextStyle,
    #[serde(flatten)]
    props: &'a BlockProps,
}

impl Serialize for ListModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let items = self.items.as_slice();
        ListRepr {
            ol: self.ordered.then_some(items),
            ul: (!self.ordered).then_some(items),
            style: &self.style,
            props: &self.props,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests;
