use super::*;
use folio_style::TextAlign;
use serde_json::json;

fn bold() -> TextStyle {
    TextStyle {
        bold: Some(true),
        ..Default::default()
    }
}

#[test]
fn test_minimize_span_collapses_unstyled_text() {
    assert_eq!(
        minimize_span(vec![ContentNode::text("hi")], TextStyle::default()),
        ContentNode::text("hi")
    );
    let styled = minimize_span(vec![ContentNode::text("hi")], bold());
    assert!(matches!(styled, ContentNode::Span(_)));
}

#[test]
fn test_minimize_block_keeps_props() {
    let plain = Block {
        content: vec![ContentNode::text("a")],
        style: TextStyle::default(),
        props: BlockProps::default(),
        stacked: false,
    };
    assert_eq!(minimize_block(plain.clone()), ContentNode::text("a"));

    let unbreakable = Block {
        props: BlockProps {
            unbreakable: true,
            ..Default::default()
        },
        ..plain
    };
    assert!(matches!(minimize_block(unbreakable), ContentNode::Block(_)));
}

#[test]
fn test_minimize_block_unwraps_single_block_level_child() {
    let stack = ContentNode::Stack(Stack {
        stack: vec![ContentNode::text("a")],
        unbreakable: true,
    });
    let wrapper = Block {
        content: vec![stack.clone()],
        ..Default::default()
    };
    assert_eq!(minimize_block(wrapper.clone()), stack);

    let span = minimize_span(vec![ContentNode::text("a")], bold());
    let inline_wrapper = Block {
        content: vec![span],
        ..wrapper
    };
    assert!(matches!(minimize_block(inline_wrapper), ContentNode::Block(_)));
}

#[test]
fn test_block_level_classification() {
    assert!(!ContentNode::text("x").is_block_level());
    assert!(ContentNode::Stack(Stack::default()).is_block_level());
    assert!(ContentNode::line_break().is_line_break());
}

#[test]
fn test_set_unbreakable() {
    let mut stack = ContentNode::Stack(Stack::default());
    assert!(stack.set_unbreakable());
    assert_eq!(serde_json::to_value(&stack).unwrap(), json!({"stack": [], "unbreakable": true}));
    assert!(!ContentNode::text("x").set_unbreakable());
}

#[test]
fn test_span_serialization() {
    let span = ContentNode::Span(Span {
        text: vec![ContentNode::text("bold")],
        style: bold(),
        link: Some("http://example.com".into()),
        link_to_destination: None,
    });
    assert_eq!(
        serde_json::to_value(&span).unwrap(),
        json!({"text": "bold", "bold": true, "link": "http://example.com"})
    );
}

#[test]
fn test_block_serialization_flattens_style_and_props() {
    let block = ContentNode::Block(Block {
        content: vec![ContentNode::text("a "), ContentNode::text("b")],
        style: TextStyle {
            alignment: Some(TextAlign::Center),
            ..Default::default()
        },
        props: BlockProps {
            margin: Some(Margins::from_shorthand(&[1.0, 2.0]).unwrap()),
            page_break: Some(PageBreak::Before),
            ..Default::default()
        },
        stacked: false,
    });
    assert_eq!(
        serde_json::to_value(&block).unwrap(),
        json!({
            "text": ["a ", "b"],
            "alignment": "center",
            "margin": [2.0, 1.0, 2.0, 1.0],
            "pageBreak": "before"
        })
    );
}

#[test]
fn test_stacked_block_serializes_as_stack() {
    let inner = ContentNode::Block(Block {
        content: vec![ContentNode::text("x")],
        style: bold(),
        ..Default::default()
    });
    let outer = ContentNode::Block(Block {
        content: vec![inner.clone(), inner],
        ..Default::default()
    });
    let value = serde_json::to_value(&outer).unwrap();
    assert_eq!(value["stack"][0], json!({"text": "x", "bold": true}));
    assert!(value.get("text").is_none());
}

#[test]
fn test_block_of_bare_text_lines_serializes_as_stack() {
    let block = ContentNode::Block(Block {
        content: vec![ContentNode::text("one"), ContentNode::text("two")],
        stacked: true,
        ..Default::default()
    });
    assert_eq!(serde_json::to_value(&block).unwrap(), json!({"stack": ["one", "two"]}));

    let single = minimize_block(Block {
        content: vec![ContentNode::text("only")],
        stacked: true,
        ..Default::default()
    });
    assert_eq!(single, ContentNode::text("only"));
}

#[test]
fn test_cell_serialization() {
    let mut cell = Cell::new(ContentNode::text("c"));
    cell.col_span = 2;
    cell.border = Some([true, false, true, false]);
    cell.fill_color = Color::parse("#eee");
    assert_eq!(
        serde_json::to_value(ContentNode::Cell(cell)).unwrap(),
        json!({"text": "c", "colSpan": 2, "border": [true, false, true, false], "fillColor": "#eee"})
    );
    assert_eq!(
        serde_json::to_value(ContentNode::Cell(Cell::placeholder())).unwrap(),
        json!({})
    );
}

#[test]
fn test_table_serialization() {
    let table = ContentNode::Table(Box::new(Table {
        table: TableModel {
            widths: vec![ColumnWidth::Percent(25.0), ColumnWidth::Star],
            body: vec![vec![ContentNode::text("a"), ContentNode::text("b")]],
            header_rows: 0,
        },
        layout: Some(TableLayout::from_edges(
            1,
            2,
            vec![1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![None, None],
            vec![None, None, None],
        )),
        style: TextStyle::default(),
        props: BlockProps::default(),
    }));
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(value["table"]["widths"], json!(["25%", "*"]));
    assert_eq!(value["table"]["body"], json!([["a", "b"]]));
    assert!(value["table"].get("headerRows").is_none());
    assert_eq!(value["layout"]["vLineWidth"], json!([1.0, 0.0, 1.0]));
}

#[test]
fn test_list_serialization() {
    let list = ContentNode::List(ListModel {
        ordered: true,
        items: vec![ContentNode::text("one"), ContentNode::text("two")],
        style: TextStyle::default(),
        props: BlockProps::default(),
    });
    assert_eq!(serde_json::to_value(&list).unwrap(), json!({"ol": ["one", "two"]}));
}
