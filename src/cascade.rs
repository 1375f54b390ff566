// src/cascade.rs
//! The attribute cascade preprocessor.
//!
//! Each rule threads its own inherited map down the tree. The map exists only below an
//! element of the rule's owner tag and only along paths made entirely of inheriter tags;
//! descending into any other tag drops it for that subtree. At the owner, and at every
//! inheriter on the way down, the element's own values for the rule's attributes are
//! merged over the map, so the nearest declaration wins.
//!
//! Inherited values are only ever added to an element when it does not declare the
//! attribute itself. When several rules reach the same element their maps are applied in
//! rule order, the first rule taking precedence. The walk is bounded by tree depth, so a
//! rule naming its owner among its inheriters cannot loop.
//!
//! `font-size` is handed down as the resolved point size, so a relative size such as
//! `2em` applies once at its declaring element and not again at every heir.

use crate::config::{CascadeRule, RuleSet};
use folio_style::StyleContext;
use folio_types::{Attributes, Element, SourceNode};
use log::trace;

/// Returns a copy of `tree` with inherited attributes filled in, resolving relative
/// font sizes against the default context.
pub fn apply(tree: &SourceNode, rules: &RuleSet) -> SourceNode {
    apply_with_context(tree, rules, &StyleContext::default())
}

/// Like [`apply`], with the sizing context in force at the tree's root.
pub fn apply_with_context(tree: &SourceNode, rules: &RuleSet, ctx: &StyleContext) -> SourceNode {
    if rules.is_empty() {
        return tree.clone();
    }
    let inherited = vec![None; rules.rules.len()];
    cascade_node(tree, &rules.rules, &inherited, ctx)
}

fn cascade_node(
    node: &SourceNode,
    rules: &[CascadeRule],
    inherited: &[Option<Attributes>],
    ctx: &StyleContext,
) -> SourceNode {
    match node {
        SourceNode::Text(_) => node.clone(),
        SourceNode::Element(element) => {
            SourceNode::Element(cascade_element(element, rules, inherited, ctx))
        }
    }
}

fn cascade_element(
    element: &Element,
    rules: &[CascadeRule],
    inherited: &[Option<Attributes>],
    ctx: &StyleContext,
) -> Element {
    let mut attributes = element.attributes.clone();
    let mut added = 0usize;
    for (name, value) in inherited.iter().flatten().flat_map(|map| map.iter()) {
        if attributes.insert_if_absent(name, value) {
            added += 1;
        }
    }
    if added > 0 {
        trace!("<{}> inherited {} attribute(s)", element.tag, added);
    }

    let own = ctx.descend(&attributes);
    let propagated: Vec<Option<Attributes>> = rules
        .iter()
        .zip(inherited)
        .map(|(rule, incoming)| {
            propagate(rule, &element.tag, &attributes, &own, incoming.as_ref())
        })
        .collect();

    let children = element
        .children
        .iter()
        .map(|child| {
            let child_maps: Vec<Option<Attributes>> = match child.tag() {
                Some(tag) => rules
                    .iter()
                    .zip(&propagated)
                    .map(|(rule, map)| map.clone().filter(|_| rule.is_inheriter(tag)))
                    .collect(),
                None => Vec::new(),
            };
            cascade_node(child, rules, &child_maps, &own)
        })
        .collect();

    Element {
        tag: element.tag.clone(),
        attributes,
        children,
    }
}

/// The map `rule` hands to this element's inheriter children. `attributes` already
/// includes what the element inherited, so values received through another rule
/// flow on from here.
fn propagate(
    rule: &CascadeRule,
    tag: &str,
    attributes: &Attributes,
    own: &StyleContext,
    incoming: Option<&Attributes>,
) -> Option<Attributes> {
    let mut map = match incoming {
        Some(map) => map.clone(),
        None if tag == rule.tag => Attributes::new(),
        None => return None,
    };
    for name in &rule.inheritable_attributes {
        let Some(value) = attributes.get(name) else {
            continue;
        };
        match own.font_size {
            Some(size) if name == "font-size" => map.insert(name.as_str(), format!("{}pt", size)),
            _ => map.insert(name.as_str(), value),
        }
    }
    Some(map)
}
