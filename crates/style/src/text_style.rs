//! Per-concern resolvers mapping element attributes to text style properties.
//!
//! Every resolver returns `None` when its attribute is unset or unparseable; defaults
//! are left to the renderer.

use crate::font::primary_font_family;
use crate::parsers::{
    parse_font_style, parse_font_weight, parse_length, parse_text_align, parse_text_decoration,
    run_parser,
};
use crate::text::{TextAlign, TextDecoration};
use folio_types::{Attributes, Color};
use log::debug;
use serde::{Deserialize, Serialize};

/// Inherited sizing context for relative units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleContext {
    /// Nearest resolved font size of an ancestor, if any.
    pub font_size: Option<f32>,
    /// Font size `em`/`rem` resolve against when no ancestor size is known.
    pub base_font_size: f32,
    /// Divisor for absolute line heights when no font size is known.
    pub line_height_base: f32,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            font_size: None,
            base_font_size: 12.0,
            line_height_base: 10.0,
        }
    }
}

impl StyleContext {
    pub fn em_basis(&self) -> f32 {
        self.font_size.unwrap_or(self.base_font_size)
    }

    /// The context children of an element with the given attributes see.
    pub fn descend(&self, attrs: &Attributes) -> StyleContext {
        StyleContext {
            font_size: resolve_font_size(attrs, self).or(self.font_size),
            ..*self
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
}

impl TextStyle {
    pub fn resolve(attrs: &Attributes, ctx: &StyleContext) -> Self {
        let font_size = resolve_font_size(attrs, ctx);
        Self {
            bold: resolve_bold(attrs),
            italics: resolve_italics(attrs),
            decoration: resolve_decoration(attrs),
            font_size,
            color: attrs.get("color").and_then(Color::parse),
            alignment: attrs
                .get("text-align")
                .and_then(|v| parse_text_align(v).ok()),
            font: attrs.get("font-family").and_then(primary_font_family),
            background: attrs.get("background-color").and_then(Color::parse),
            line_height: resolve_line_height(attrs, font_size, ctx),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TextStyle::default()
    }
}

pub fn resolve_bold(attrs: &Attributes) -> Option<bool> {
    let value = attrs.get("font-weight")?;
    parse_font_weight(value).ok().map(|w| w.is_bold())
}

pub fn resolve_italics(attrs: &Attributes) -> Option<bool> {
    let value = attrs.get("font-style")?;
    parse_font_style(value).ok().map(|s| s.is_italic())
}

pub fn resolve_decoration(attrs: &Attributes) -> Option<TextDecoration> {
    let value = attrs.get("text-decoration")?;
    parse_text_decoration(value).ok().flatten()
}

/// Font size in points. `em`, `rem` and `%` resolve against the context size.
pub fn resolve_font_size(attrs: &Attributes, ctx: &StyleContext) -> Option<f32> {
    let value = attrs.get("font-size")?;
    match run_parser(parse_length, value) {
        Ok(length) => Some(length.to_pt(ctx.em_basis())),
        Err(e) => {
            debug!("Ignoring font-size '{}': {}", value, e);
            None
        }
    }
}

/// Line height as a multiplier of the font size.
///
/// Bare numbers are multipliers already; lengths are divided by the effective font size
/// (own, then inherited, then `line_height_base`).
pub fn resolve_line_height(
    attrs: &Attributes,
    own_font_size: Option<f32>,
    ctx: &StyleContext,
) -> Option<f32> {
    let value = attrs.get("line-height")?;
    if value.trim().eq_ignore_ascii_case("normal") {
        return None;
    }
    let length = run_parser(parse_length, value).ok()?;
    if length.is_unitless() {
        return Some(length.value);
    }
    let font_size = own_font_size
        .or(ctx.font_size)
        .unwrap_or(ctx.line_height_base);
    if font_size <= 0.0 {
        return None;
    }
    Some(length.to_pt(font_size) / font_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_absent_means_none() {
        let style = TextStyle::resolve(&attrs(&[("id", "x")]), &StyleContext::default());
        assert!(style.is_empty());
    }

    #[test]
    fn test_bold_and_italics() {
        let ctx = StyleContext::default();
        assert_eq!(resolve_bold(&attrs(&[("font-weight", "bolder")])), Some(true));
        assert_eq!(resolve_bold(&attrs(&[("font-weight", "700")])), Some(true));
        assert_eq!(resolve_bold(&attrs(&[("font-weight", "normal")])), Some(false));
        assert_eq!(resolve_bold(&attrs(&[("font-weight", "heavy")])), None);
        let style = TextStyle::resolve(&attrs(&[("font-style", "oblique")]), &ctx);
        assert_eq!(style.italics, Some(true));
    }

    #[test]
    fn test_font_size_units() {
        let ctx = StyleContext::default();
        let size = |v| resolve_font_size(&attrs(&[("font-size", v)]), &ctx);
        assert_eq!(size("10pt"), Some(10.0));
        assert_eq!(size("16px"), Some(12.0));
        assert_eq!(size("2em"), Some(24.0));
        assert_eq!(size("1.5rem"), Some(18.0));
        assert_eq!(size("huge"), None);

        let nested = StyleContext {
            font_size: Some(10.0),
            ..ctx
        };
        assert_eq!(
            resolve_font_size(&attrs(&[("font-size", "2em")]), &nested),
            Some(20.0)
        );
    }

    #[test]
    fn test_line_height() {
        let ctx = StyleContext::default();
        let lh = |pairs: &[(&str, &str)]| {
            let a = attrs(pairs);
            resolve_line_height(&a, resolve_font_size(&a, &ctx), &ctx)
        };
        assert_eq!(lh(&[("line-height", "1.4")]), Some(1.4));
        assert_eq!(lh(&[("line-height", "15pt")]), Some(1.5));
        assert_eq!(lh(&[("line-height", "15pt"), ("font-size", "10pt")]), Some(1.5));
        assert_eq!(lh(&[("line-height", "24pt"), ("font-size", "12pt")]), Some(2.0));
        assert_eq!(lh(&[("line-height", "normal")]), None);
    }

    #[test]
    fn test_color_font_alignment() {
        let style = TextStyle::resolve(
            &attrs(&[
                ("color", "Navy"),
                ("font-family", "\"Times New Roman\", serif"),
                ("text-align", "center"),
                ("background-color", "#EEE"),
                ("text-decoration", "underline"),
            ]),
            &StyleContext::default(),
        );
        assert_eq!(style.color.unwrap().as_str(), "navy");
        assert_eq!(style.font.as_deref(), Some("times new roman"));
        assert_eq!(style.alignment, Some(TextAlign::Center));
        assert_eq!(style.background.unwrap().as_str(), "#EEE");
        assert_eq!(style.decoration, Some(TextDecoration::Underline));
    }

    #[test]
    fn test_descend_keeps_inherited_size() {
        let ctx = StyleContext::default();
        let child = ctx.descend(&attrs(&[("font-size", "8pt")]));
        assert_eq!(child.font_size, Some(8.0));
        let grandchild = child.descend(&attrs(&[]));
        assert_eq!(grandchild.font_size, Some(8.0));
    }
}
