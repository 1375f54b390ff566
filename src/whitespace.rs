// src/whitespace.rs
//! HTML-like whitespace normalization over already-converted children.

use folio_idf::ContentNode;
use itertools::Itertools;

/// Normalizes a converted children list.
///
/// Whitespace runs collapse to one space, emptied text items are dropped, the list's
/// leading and trailing text is trimmed, and a single space is inserted between two
/// adjacent inline objects whose separating markup whitespace was lost. Line-break
/// markers are never collapsed, dropped or trimmed, and stop trimming. No space is
/// inserted next to block-level nodes. Normalizing the result again changes nothing.
pub fn normalize(children: Vec<ContentNode>) -> Vec<ContentNode> {
    let mut items: Vec<ContentNode> = children
        .into_iter()
        .filter_map(|node| match node {
            ContentNode::Text(t) if t != folio_idf::LINE_BREAK => {
                let collapsed = collapse_whitespace(&t);
                (!collapsed.is_empty()).then(|| ContentNode::Text(collapsed))
            }
            other => Some(other),
        })
        .collect();

    trim_leading(&mut items);
    trim_trailing(&mut items);
    separate_objects(items)
}

/// Collapses every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .coalesce(|a, b| {
            if a == ' ' && b == ' ' {
                Ok(' ')
            } else {
                Err((a, b))
            }
        })
        .collect()
}

fn trim_leading(items: &mut Vec<ContentNode>) {
    while let Some(ContentNode::Text(t)) = items.first_mut() {
        if t == folio_idf::LINE_BREAK {
            return;
        }
        let trimmed = t.trim_start();
        if !trimmed.is_empty() {
            *t = trimmed.to_string();
            return;
        }
        items.remove(0);
    }
}

fn trim_trailing(items: &mut Vec<ContentNode>) {
    while let Some(ContentNode::Text(t)) = items.last_mut() {
        if t == folio_idf::LINE_BREAK {
            return;
        }
        let trimmed = t.trim_end();
        if !trimmed.is_empty() {
            *t = trimmed.to_string();
            return;
        }
        items.pop();
    }
}

fn separate_objects(items: Vec<ContentNode>) -> Vec<ContentNode> {
    let mut out: Vec<ContentNode> = Vec::with_capacity(items.len());
    for item in items {
        if let Some(prev) = out.last() {
            let needs_space = !prev.is_text()
                && !item.is_text()
                && !prev.is_block_level()
                && !item.is_block_level();
            if needs_space {
                out.push(ContentNode::text(" "));
            }
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_idf::{Block, BlockProps, Span};
    use folio_style::TextStyle;

    fn span(text: &str) -> ContentNode {
        ContentNode::Span(Span {
            text: vec![ContentNode::text(text)],
            style: TextStyle {
                bold: Some(true),
                ..Default::default()
            },
            link: None,
            link_to_destination: None,
        })
    }

    fn block(text: &str) -> ContentNode {
        ContentNode::Block(Block {
            content: vec![ContentNode::text(text)],
            style: TextStyle::default(),
            props: BlockProps {
                unbreakable: true,
                ..Default::default()
            },
            stacked: false,
        })
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("  x  "), " x ");
    }

    #[test]
    fn test_trims_ends_and_drops_empties() {
        let out = normalize(vec![
            ContentNode::text("   "),
            ContentNode::text("  Hello   world "),
            span("b"),
            ContentNode::text(" tail  "),
        ]);
        assert_eq!(
            out,
            vec![ContentNode::text("Hello world "), span("b"), ContentNode::text(" tail")]
        );
    }

    #[test]
    fn test_markers_survive_and_stop_trimming() {
        let out = normalize(vec![
            ContentNode::line_break(),
            ContentNode::text(" a "),
            ContentNode::line_break(),
        ]);
        assert_eq!(
            out,
            vec![ContentNode::line_break(), ContentNode::text(" a "), ContentNode::line_break()]
        );
    }

    #[test]
    fn test_space_between_adjacent_inlines() {
        let out = normalize(vec![span("a"), span("b")]);
        assert_eq!(out, vec![span("a"), ContentNode::text(" "), span("b")]);
    }

    #[test]
    fn test_no_space_next_to_blocks() {
        let out = normalize(vec![block("a"), block("b"), span("c")]);
        assert_eq!(out, vec![block("a"), block("b"), span("c")]);
    }

    #[test]
    fn test_fixed_point() {
        let input = vec![
            ContentNode::text("\n  lead "),
            span("a"),
            span("b"),
            ContentNode::line_break(),
            ContentNode::text("  "),
            block("c"),
            ContentNode::text(" end\t"),
        ];
        let once = normalize(input);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }
}
