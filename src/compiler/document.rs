// src/compiler/document.rs
use crate::error::FolioError;
use folio_idf::ContentNode;
use serde::Serialize;

/// The content of one `page-sequence`, or of a whole fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSequence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_reference: Option<String>,
    pub content: Vec<ContentNode>,
}

/// A compiled document: its page sequences in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub page_sequences: Vec<PageSequence>,
}

impl Document {
    /// All content of all sequences, in order.
    pub fn content(&self) -> impl Iterator<Item = &ContentNode> {
        self.page_sequences.iter().flat_map(|s| s.content.iter())
    }

    pub fn into_content(self) -> Vec<ContentNode> {
        self.page_sequences
            .into_iter()
            .flat_map(|s| s.content)
            .collect()
    }

    pub fn to_json(&self) -> Result<String, FolioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, FolioError> {
        Ok(serde_json::to_value(self)?)
    }
}
