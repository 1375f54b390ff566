// src/error.rs
use thiserror::Error;

/// Failures raised by an element converter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Element '{tag}' is missing required structure: {message}")]
    Structure { tag: String, message: String },

    #[error("Expected an element node, found text '{0}'")]
    NotAnElement(String),
}

/// A comprehensive error type for the whole compilation.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is missing required structure: {0}")]
    MissingStructure(String),

    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),
}
