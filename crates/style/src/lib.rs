pub mod border;
pub mod box_model;
pub mod dimension;
pub mod font;
pub mod parsers;
pub mod text;
pub mod text_style;

pub use border::{BorderSide, BorderStyle, Borders, Side};
pub use box_model::{BoxStyle, KeepFlags};
pub use dimension::{ColumnWidth, Length, Margins, Unit};
pub use font::{FontStyle, FontWeight};
pub use parsers::StyleParseError;
pub use text::{PageBreak, TextAlign, TextDecoration};
pub use text_style::{StyleContext, TextStyle};
