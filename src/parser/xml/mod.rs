// FILE: src/parser/xml/mod.rs
//! Builds the owned `SourceNode` tree from XML markup using `roxmltree`.
//!
//! Tag and attribute names are namespace-resolved local names, so `fo:block` and a
//! default-namespaced `block` read the same. Comments and processing instructions are
//! dropped.

use folio_types::{Attributes, Element, SourceNode};
use roxmltree::{Document, Node};

/// Parses markup and returns its document element.
pub fn parse_document(text: &str) -> Result<SourceNode, roxmltree::Error> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    log::debug!("Parsed XML document with root <{}>", root.tag_name().name());
    Ok(SourceNode::Element(build_element(root)))
}

fn build_element(node: Node<'_, '_>) -> Element {
    let attributes: Attributes = node
        .attributes()
        .map(|attr| (attr.name(), attr.value()))
        .collect();
    let children = node.children().filter_map(build_node).collect();
    Element {
        tag: node.tag_name().name().to_string(),
        attributes,
        children,
    }
}

fn build_node(node: Node<'_, '_>) -> Option<SourceNode> {
    if node.is_element() {
        Some(SourceNode::Element(build_element(node)))
    } else if node.is_text() {
        node.text().map(SourceNode::text)
    } else {
        None
    }
}
