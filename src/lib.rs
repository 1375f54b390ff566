//! folio compiles formatting-objects XML into a declarative document model that a
//! paginating renderer consumes.
//!
//! The stages run in order over one document: the XML front end builds a `SourceNode`
//! tree, the cascade preprocessor fills in inherited attributes, the traversal engine
//! converts the tree bottom-up through the registered element converters, and keep
//! groups are formed over every stacked content list.

pub mod cascade;
pub mod compiler;
pub mod config;
pub mod convert;
pub mod error;
pub mod keep;
pub mod parser;
pub mod traverse;
pub mod whitespace;

pub use compiler::{Compiler, CompilerBuilder, Document, PageSequence};
pub use config::{CascadeRule, CompileOptions, RuleSet};
pub use error::{ConvertError, FolioError};
pub use traverse::{Converted, ConverterRegistry, ElementConverter, Traversal};

pub use folio_idf as idf;
pub use folio_style as style;
pub use folio_types as types;
