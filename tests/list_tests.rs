mod common;

use common::fixtures::*;
use common::{TestResult, compile_flow};
use serde_json::json;

#[test]
fn test_bulleted_list() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let content = compile_flow(&list(&[("•", "Apples"), ("•", "Pears")]))?;
    assert_eq!(content, json!([{ "ul": ["Apples", "Pears"] }]));
    Ok(())
}

#[test]
fn test_numbered_list() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let content = compile_flow(&list(&[("1.", "First"), ("2.", "Second"), ("3.", "Third")]))?;
    assert_eq!(content, json!([{ "ol": ["First", "Second", "Third"] }]));
    Ok(())
}

#[test]
fn test_lettered_labels_are_numbered() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let content = compile_flow(&list(&[("a)", "x"), ("b)", "y")]))?;
    assert!(content[0].get("ol").is_some());
    Ok(())
}

#[test]
fn test_list_box_properties() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let item = element(
        "list-item",
        &[],
        &format!(
            "{}{}",
            element("list-item-label", &[], &block(&[], "-")),
            element("list-item-body", &[], &block(&[], "only"))
        ),
    );
    let markup = element(
        "list-block",
        &[("space-after", "4pt"), ("color", "gray")],
        &item,
    );
    let content = compile_flow(&markup)?;
    assert_eq!(
        content,
        json!([{ "ul": ["only"], "color": "gray", "margin": [0.0, 0.0, 0.0, 4.0] }])
    );
    Ok(())
}

#[test]
fn test_empty_list_is_dropped() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let content = compile_flow(&format!("{}{}", element("list-block", &[], ""), block(&[], "after")))?;
    assert_eq!(content, json!(["after"]));
    Ok(())
}
