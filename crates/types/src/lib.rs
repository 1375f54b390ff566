pub mod color;
pub mod source;

pub use color::Color;
pub use source::{Attributes, Element, SourceNode};
