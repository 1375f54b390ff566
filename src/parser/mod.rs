//! Markup front ends producing the `SourceNode` tree the compiler consumes.
pub mod xml;

pub use xml::parse_document;
