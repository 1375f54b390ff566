use serde::Serialize;
use std::fmt;

/// A color value as it is handed to the renderer.
///
/// Hex colors (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) pass through exactly as written,
/// named colors and functional notations are lowercased.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses a color token, returning `None` for anything that is not recognizably a color.
    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::is_hex(hex).then(|| Color(s.to_string()));
        }
        if s.is_empty() {
            return None;
        }
        if s.chars().all(|c| c.is_ascii_alphabetic()) {
            return Some(Color(s.to_ascii_lowercase()));
        }
        let lower = s.to_ascii_lowercase();
        if (lower.starts_with("rgb(") || lower.starts_with("rgba(")) && lower.ends_with(')') {
            return Some(Color(lower));
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_hex(hex: &str) -> bool {
        matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_passthrough() {
        assert_eq!(Color::parse("#FF0000").unwrap().as_str(), "#FF0000");
        assert_eq!(Color::parse(" #f00 ").unwrap().as_str(), "#f00");
        assert!(Color::parse("#ff00").is_some());
        assert!(Color::parse("#ff00zz").is_none());
        assert!(Color::parse("#12345").is_none());
    }

    #[test]
    fn test_named_lowercased() {
        assert_eq!(Color::parse("Red").unwrap().as_str(), "red");
        assert_eq!(Color::parse("DarkSlateGray").unwrap().as_str(), "darkslategray");
    }

    #[test]
    fn test_functional_and_garbage() {
        assert_eq!(
            Color::parse("RGB(1, 2, 3)").unwrap().as_str(),
            "rgb(1, 2, 3)"
        );
        assert!(Color::parse("").is_none());
        assert!(Color::parse("12pt").is_none());
    }
}
