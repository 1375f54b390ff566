// src/traverse.rs
//! The post-order traversal engine and the converter protocol.
//!
//! The walker converts every child of an element before the element itself and hands
//! the converted children to the converter registered for the element's tag. The
//! traversal is passed along so a converter can walk its subtree by hand, for example
//! to route a table cell's children through the dispatcher itself.

use crate::config::CompileOptions;
use crate::error::ConvertError;
use crate::keep;
use folio_idf::{ContentNode, Stack};
use folio_style::StyleContext;
use folio_types::{Element, SourceNode};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A converted node plus the markers its parent consumes: the keeps for the grouping
/// pass, and whether the source element occupied its own vertical slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub content: ContentNode,
    pub keep_with_previous: bool,
    pub keep_with_next: bool,
    /// Survives minimization: a block that collapsed to bare text is still a block.
    pub block_level: bool,
}

impl Converted {
    pub fn new(content: ContentNode) -> Self {
        let block_level = content.is_block_level();
        Self {
            content,
            keep_with_previous: false,
            keep_with_next: false,
            block_level,
        }
    }

    pub fn with_keeps(mut self, with_previous: bool, with_next: bool) -> Self {
        self.keep_with_previous = with_previous;
        self.keep_with_next = with_next;
        self
    }

    pub fn with_block_level(mut self, block_level: bool) -> Self {
        self.block_level = block_level;
        self
    }

    pub fn into_content(self) -> ContentNode {
        self.content
    }
}

impl From<ContentNode> for Converted {
    fn from(content: ContentNode) -> Self {
        Converted::new(content)
    }
}

/// Converts one element into output content.
pub trait ElementConverter: Send + Sync {
    /// Builds the element's output from its already-converted children. Returning
    /// `Ok(None)` drops the element.
    fn convert(
        &self,
        element: &Element,
        children: Vec<Converted>,
        traversal: &Traversal<'_>,
    ) -> Result<Option<Converted>, ConvertError>;

    /// Whether the walker should convert the children before calling `convert`.
    /// Converters that walk their own subtree return `false` and receive no children.
    fn descends(&self, _element: &Element) -> bool {
        true
    }
}

/// Structural tags that are only ever converted by a registered converter or by their
/// container's converter. Without one they are skipped rather than passed through.
pub const STRUCTURAL_TAGS: [&str; 15] = [
    "block",
    "inline",
    "basic-link",
    "table",
    "table-column",
    "table-header",
    "table-body",
    "table-footer",
    "table-row",
    "table-cell",
    "list-block",
    "list-item",
    "list-item-label",
    "list-item-body",
    "flow",
];

/// Tag to converter dispatch table.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn ElementConverter>>,
    skipped: HashSet<String>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tag: &str, converter: Arc<dyn ElementConverter>) {
        self.skipped.remove(tag);
        self.converters.insert(tag.to_string(), converter);
    }

    pub fn unregister(&mut self, tag: &str) {
        self.converters.remove(tag);
    }

    /// Marks `tag` as never converted. Its subtree is dropped.
    pub fn skip(&mut self, tag: &str) {
        self.skipped.insert(tag.to_string());
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<dyn ElementConverter>> {
        self.converters.get(tag)
    }

    pub fn is_skipped(&self, tag: &str) -> bool {
        self.skipped.contains(tag)
    }
}

/// One position in the walk: the registry, the options and the sizing context in force
/// for the node being converted.
#[derive(Clone)]
pub struct Traversal<'a> {
    registry: &'a ConverterRegistry,
    options: &'a CompileOptions,
    context: StyleContext,
}

impl<'a> Traversal<'a> {
    pub fn new(registry: &'a ConverterRegistry, options: &'a CompileOptions) -> Self {
        Self {
            registry,
            options,
            context: options.style_context(),
        }
    }

    /// The sizing context an element at this position resolves its own style against.
    pub fn context(&self) -> &StyleContext {
        &self.context
    }

    pub fn options(&self) -> &CompileOptions {
        self.options
    }

    /// The traversal for `element`'s children.
    pub fn descend(&self, element: &Element) -> Traversal<'a> {
        Traversal {
            registry: self.registry,
            options: self.options,
            context: self.context.descend(&element.attributes),
        }
    }

    /// Converts a node with the converter registered for its tag.
    pub fn traverse(&self, node: &SourceNode) -> Result<Option<Converted>, ConvertError> {
        let element = match node {
            SourceNode::Text(text) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                return Ok(Some(ContentNode::text(text.as_str()).into()));
            }
            SourceNode::Element(element) => element,
        };

        if self.registry.is_skipped(&element.tag) {
            trace!("Skipping <{}>", element.tag);
            return Ok(None);
        }
        match self.registry.get(&element.tag) {
            Some(converter) => self.convert_with(element, converter.as_ref()),
            None if STRUCTURAL_TAGS.contains(&element.tag.as_str()) => {
                debug!("No converter registered for <{}>; skipping it", element.tag);
                Ok(None)
            }
            None => self.pass_through(element),
        }
    }

    /// Converts an element with an explicit converter instead of the registered one.
    pub fn convert_with(
        &self,
        element: &Element,
        converter: &dyn ElementConverter,
    ) -> Result<Option<Converted>, ConvertError> {
        let children = if converter.descends(element) {
            self.convert_children(element)?
        } else {
            Vec::new()
        };
        converter.convert(element, children, self)
    }

    /// Converts a text-or-element node with an explicit converter.
    pub fn traverse_with(
        &self,
        node: &SourceNode,
        converter: &dyn ElementConverter,
    ) -> Result<Option<Converted>, ConvertError> {
        match node {
            SourceNode::Element(element) => self.convert_with(element, converter),
            SourceNode::Text(text) => Err(ConvertError::NotAnElement(text.clone())),
        }
    }

    /// Converts the children of `element` in document order, dropping empty results.
    pub fn convert_children(&self, element: &Element) -> Result<Vec<Converted>, ConvertError> {
        let inner = self.descend(element);
        let mut converted = Vec::with_capacity(element.children.len());
        for child in &element.children {
            if let Some(node) = inner.traverse(child)? {
                converted.push(node);
            }
        }
        Ok(converted)
    }

    /// Elements nobody claims dissolve into their content: one child stands for the
    /// element, several are stacked without forbidding breaks.
    fn pass_through(&self, element: &Element) -> Result<Option<Converted>, ConvertError> {
        trace!("Passing through unknown element <{}>", element.tag);
        let mut children = self.convert_children(element)?;
        Ok(match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(
                ContentNode::Stack(Stack {
                    stack: keep::group(children),
                    unbreakable: false,
                })
                .into(),
            ),
        })
    }
}
