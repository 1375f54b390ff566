use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    ///
    /// Relative keywords are resolved against a normal (400) parent.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Bold => 700,
            FontWeight::Bolder => 700,
            FontWeight::Lighter => 100,
            FontWeight::Numeric(n) => *n,
        }
    }

    /// Whether the renderer should use a bold face: `bold`, `bolder`, or 600 and above.
    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= 600
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn is_italic(&self) -> bool {
        !matches!(self, FontStyle::Normal)
    }
}

/// Picks the first family of a font stack, unquoted and lowercased.
pub fn primary_font_family(stack: &str) -> Option<String> {
    let first = stack.split(',').next()?.trim();
    let unquoted = first.trim_matches(|c| c == '"' || c == '\'').trim();
    if unquoted.is_empty() {
        None
    } else {
        Some(unquoted.to_lowercase())
    }
}
