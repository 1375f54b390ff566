#![allow(dead_code)]

pub mod fixtures;

use folio::{Compiler, Document, FolioError};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Compile markup with the default compiler
pub fn compile(markup: &str) -> Result<Document, FolioError> {
    Compiler::default().compile_str(markup)
}

/// Compile flow content inside a complete document and return the first page
/// sequence's content as JSON
pub fn compile_flow(flow: &str) -> Result<Value, FolioError> {
    compile_flow_with(&Compiler::default(), flow)
}

/// Same as `compile_flow` with a configured compiler
pub fn compile_flow_with(compiler: &Compiler, flow: &str) -> Result<Value, FolioError> {
    let document = compiler.compile_str(&fixtures::fo_document(flow))?;
    let mut value = document.to_value()?;
    Ok(value
        .pointer_mut("/pageSequences/0/content")
        .map(Value::take)
        .unwrap_or(Value::Null))
}
