// src/compiler/mod.rs
//! The compilation facade: parse, cascade, convert, group.

mod builder;
mod document;

pub use builder::CompilerBuilder;
pub use document::{Document, PageSequence};

use crate::cascade;
use crate::config::CompileOptions;
use crate::error::FolioError;
use crate::keep;
use crate::parser::parse_document;
use crate::traverse::{ConverterRegistry, Traversal};
use folio_idf::ContentNode;
use folio_types::{Element, SourceNode};
use log::{debug, info, warn};

/// Compiles FO markup into the content model. Holds no per-document state, so one
/// compiler can serve many documents, from several threads at once.
pub struct Compiler {
    options: CompileOptions,
    registry: ConverterRegistry,
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            options: CompileOptions::default(),
            registry: crate::convert::standard_registry(),
        }
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Parses and compiles markup.
    pub fn compile_str(&self, markup: &str) -> Result<Document, FolioError> {
        let tree = parse_document(markup)?;
        self.compile(&tree)
    }

    /// Compiles a parsed tree. An FO `root` yields one sequence per `page-sequence`;
    /// any other document element is compiled as a single fragment.
    pub fn compile(&self, tree: &SourceNode) -> Result<Document, FolioError> {
        let tree =
            cascade::apply_with_context(tree, &self.options.rules, &self.options.style_context());
        let document = match &tree {
            SourceNode::Element(root) if root.tag == "root" => self.compile_root(root)?,
            _ => Document {
                page_sequences: vec![PageSequence {
                    master_reference: None,
                    content: self.convert_fragment(&tree)?,
                }],
            },
        };
        info!(
            "Compiled {} page sequence(s), {} top-level node(s)",
            document.page_sequences.len(),
            document.content().count()
        );
        Ok(document)
    }

    /// Compiles independent documents, one result per input in input order.
    ///
    /// With the `rayon-executor` feature the documents are compiled on rayon's global
    /// pool; a failing document does not affect the others.
    pub fn compile_batch<S>(&self, inputs: &[S]) -> Vec<Result<Document, FolioError>>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Compiling a batch of {} document(s)", inputs.len());
        #[cfg(feature = "rayon-executor")]
        {
            use rayon::prelude::*;
            inputs.par_iter().map(|m| self.compile_str(m.as_ref())).collect()
        }
        #[cfg(not(feature = "rayon-executor"))]
        {
            inputs.iter().map(|m| self.compile_str(m.as_ref())).collect()
        }
    }

    /// Converts one node (after the cascade has been applied) into body content.
    pub fn convert_fragment(&self, node: &SourceNode) -> Result<Vec<ContentNode>, FolioError> {
        let traversal = Traversal::new(&self.registry, &self.options);
        Ok(keep::group(traversal.traverse(node)?.into_iter().collect()))
    }

    fn compile_root(&self, root: &Element) -> Result<Document, FolioError> {
        let traversal = Traversal::new(&self.registry, &self.options).descend(root);
        let mut page_sequences = Vec::new();

        for sequence in root.child_elements().filter(|e| e.tag == "page-sequence") {
            let sequence_traversal = traversal.descend(sequence);
            let flows: Vec<&Element> = sequence
                .child_elements()
                .filter(|e| e.tag == "flow")
                .collect();
            if flows.is_empty() {
                warn!("Skipping <page-sequence> without a <flow>");
                continue;
            }
            let mut converted = Vec::new();
            for flow in flows {
                converted.extend(sequence_traversal.convert_children(flow)?);
            }
            let master_reference = sequence.attr("master-reference").map(str::to_string);
            debug!(
                "Converted page sequence {:?} with {} node(s)",
                master_reference,
                converted.len()
            );
            page_sequences.push(PageSequence {
                master_reference,
                content: keep::group(converted),
            });
        }

        if page_sequences.is_empty() {
            return Err(FolioError::MissingStructure(
                "<root> contains no <page-sequence> with a <flow>".to_string(),
            ));
        }
        Ok(Document { page_sequences })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CascadeRule, RuleSet};

    #[test]
    fn test_missing_flow_is_an_error() {
        let err = Compiler::default()
            .compile_str("<root><layout-master-set/><page-sequence/></root>")
            .unwrap_err();
        assert!(matches!(err, FolioError::MissingStructure(_)));
    }

    #[test]
    fn test_malformed_markup_is_an_error() {
        let err = Compiler::default().compile_str("<root><flow></root>").unwrap_err();
        assert!(matches!(err, FolioError::Xml(_)));
    }

    #[test]
    fn test_fragment_compiles() {
        let doc = Compiler::default()
            .compile_str("<block>Hello</block>")
            .unwrap();
        assert_eq!(doc.into_content(), vec![ContentNode::text("Hello")]);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let results = Compiler::default().compile_batch(&[
            "<block>one</block>",
            "<block>",
            "<block>three</block>",
        ]);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().content().next(),
            Some(&ContentNode::text("one"))
        );
        assert!(matches!(results[1], Err(FolioError::Xml(_))));
        assert_eq!(
            results[2].as_ref().unwrap().content().next(),
            Some(&ContentNode::text("three"))
        );
    }

    #[test]
    fn test_builder_rejects_ownerless_rule() {
        let result = Compiler::builder()
            .with_rules(RuleSet::new(vec![CascadeRule::new("", &["inline"], &["color"])]))
            .build();
        assert!(matches!(result, Err(FolioError::Config(_))));
    }
}
