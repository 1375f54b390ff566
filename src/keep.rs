// src/keep.rs
//! Groups nodes that must stay on the same page into unbreakable stacks.

use crate::traverse::Converted;
use folio_idf::{ContentNode, Stack};

/// One left-to-right pass over a converted list.
///
/// A node joins its predecessor when it is flagged keep-with-previous or when the
/// predecessor is flagged keep-with-next. Joining wraps both in an unbreakable stack;
/// a stack created by this pass is extended in place, so chains never nest. A flagged
/// node with nothing before it stays as it is. The markers do not survive the pass.
pub fn group(items: Vec<Converted>) -> Vec<ContentNode> {
    let mut out: Vec<ContentNode> = Vec::with_capacity(items.len());
    let mut open_group = false;
    let mut pending_next = false;

    for item in items {
        let joins = (item.keep_with_previous || pending_next) && !out.is_empty();
        pending_next = item.keep_with_next;

        if !joins {
            out.push(item.content);
            open_group = false;
            continue;
        }
        match (open_group, out.last_mut()) {
            (true, Some(ContentNode::Stack(stack))) => stack.stack.push(item.content),
            _ => {
                if let Some(previous) = out.pop() {
                    out.push(ContentNode::Stack(Stack {
                        stack: vec![previous, item.content],
                        unbreakable: true,
                    }));
                    open_group = true;
                }
            }
        }
    }
    out
}

/// Drops the markers without grouping.
pub fn strip(items: Vec<Converted>) -> Vec<ContentNode> {
    items.into_iter().map(Converted::into_content).collect()
}
