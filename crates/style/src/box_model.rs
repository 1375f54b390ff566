//! Block-level box properties: margins, padding, borders, page breaks and keeps.

use crate::border::{Borders, Side};
use crate::dimension::{Length, Margins};
use crate::parsers::{parse_length, parse_length_list, run_parser};
use crate::text::PageBreak;
use folio_types::{Attributes, Color};
use log::debug;

/// Keep constraints declared on an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepFlags {
    pub together: bool,
    pub with_previous: bool,
    pub with_next: bool,
}

impl KeepFlags {
    pub fn resolve(attrs: &Attributes) -> Self {
        Self {
            together: keep_declared(attrs, "keep-together"),
            with_previous: keep_declared(attrs, "keep-with-previous"),
            with_next: keep_declared(attrs, "keep-with-next"),
        }
    }
}

/// A keep is in force for `always` or any integer strength, on the property itself or
/// on its `.within-page`/`.within-column` components.
fn keep_declared(attrs: &Attributes, property: &str) -> bool {
    [
        property.to_string(),
        format!("{}.within-page", property),
        format!("{}.within-column", property),
    ]
    .iter()
    .filter_map(|name| attrs.get(name))
    .any(|v| {
        let v = v.trim();
        v.eq_ignore_ascii_case("always") || v.parse::<i32>().is_ok()
    })
}

/// Box properties of a block-level element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxStyle {
    pub margin: Option<Margins>,
    pub padding: Option<Margins>,
    pub borders: Borders,
    pub background: Option<Color>,
    pub page_break: Option<PageBreak>,
    pub keep: KeepFlags,
}

impl BoxStyle {
    pub fn resolve(attrs: &Attributes, em_basis: f32) -> Self {
        Self {
            margin: resolve_margin(attrs, em_basis),
            padding: resolve_spacing(attrs, "padding", em_basis),
            borders: Borders::resolve(attrs, em_basis),
            background: attrs.get("background-color").and_then(Color::parse),
            page_break: resolve_page_break(attrs),
            keep: KeepFlags::resolve(attrs),
        }
    }

    /// Whether the element needs a drawn box (borders or padding).
    pub fn has_decoration(&self) -> bool {
        self.borders.is_declared() || self.padding.is_some()
    }
}

/// Parses a margin/padding shorthand into `[left, top, right, bottom]` order.
pub fn parse_spacing_shorthand(value: &str, em_basis: f32) -> Option<Margins> {
    let lengths = run_parser(parse_length_list, value).ok()?;
    let points: Vec<f32> = lengths.into_iter().map(|l| l.to_pt(em_basis)).collect();
    Margins::from_shorthand(&points)
}

/// Resolves `<property>` plus its per-side longhands (CSS and FO side names).
pub fn resolve_spacing(attrs: &Attributes, property: &str, em_basis: f32) -> Option<Margins> {
    let mut spacing = attrs.get(property).and_then(|v| {
        let parsed = parse_spacing_shorthand(v, em_basis);
        if parsed.is_none() {
            debug!("Ignoring {}='{}'", property, v);
        }
        parsed
    });

    for side in Side::ALL {
        for name in side.attr_names(property, "") {
            let Some(value) = attrs.get(&name) else {
                continue;
            };
            let Some(points) = parse_point_length(value, em_basis) else {
                debug!("Ignoring {}='{}'", name, value);
                continue;
            };
            set_side(spacing.get_or_insert_with(Margins::default), side, points);
        }
    }
    spacing
}

fn resolve_margin(attrs: &Attributes, em_basis: f32) -> Option<Margins> {
    let mut margin = resolve_spacing(attrs, "margin", em_basis);
    let fo_spaces = [
        (Side::Top, "space-before"),
        (Side::Top, "space-before.optimum"),
        (Side::Bottom, "space-after"),
        (Side::Bottom, "space-after.optimum"),
    ];
    for (side, name) in fo_spaces {
        if let Some(points) = attrs.get(name).and_then(|v| parse_point_length(v, em_basis)) {
            set_side(margin.get_or_insert_with(Margins::default), side, points);
        }
    }
    margin
}

fn parse_point_length(value: &str, em_basis: f32) -> Option<f32> {
    run_parser(parse_length, value)
        .ok()
        .map(|l: Length| l.to_pt(em_basis))
}

fn set_side(margins: &mut Margins, side: Side, value: f32) {
    match side {
        Side::Top => margins.top = value,
        Side::Bottom => margins.bottom = value,
        Side::Left => margins.left = value,
        Side::Right => margins.right = value,
    }
}

/// `page-break-before="always"` / `break-before="page"` and their `after` counterparts.
pub fn resolve_page_break(attrs: &Attributes) -> Option<PageBreak> {
    let forced = |css: &str, fo: &str| {
        attrs
            .get(css)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("always"))
            || attrs.get(fo).is_some_and(|v| {
                matches!(
                    v.trim().to_lowercase().as_str(),
                    "page" | "even-page" | "odd-page"
                )
            })
    };
    if forced("page-break-before", "break-before") {
        Some(PageBreak::Before)
    } else if forced("page-break-after", "break-after") {
        Some(PageBreak::After)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_spacing_shorthand_orders() {
        let m = |v| parse_spacing_shorthand(v, 12.0).unwrap().to_array();
        assert_eq!(m("3pt"), [3.0; 4]);
        assert_eq!(m("1pt 2pt"), [2.0, 1.0, 2.0, 1.0]);
        assert_eq!(m("1pt 2pt 3pt 4pt"), [4.0, 1.0, 2.0, 3.0]);
        assert!(parse_spacing_shorthand("1pt x", 12.0).is_none());
    }

    #[test]
    fn test_longhands_override_shorthand() {
        let a = attrs(&[("padding", "2pt"), ("padding-left", "5pt"), ("padding-after", "1pt")]);
        let p = resolve_spacing(&a, "padding", 12.0).unwrap();
        assert_eq!(p.to_array(), [5.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_space_before_after_become_margins() {
        let a = attrs(&[("space-before", "6pt"), ("space-after.optimum", "3pt")]);
        let style = BoxStyle::resolve(&a, 12.0);
        assert_eq!(style.margin.unwrap().to_array(), [0.0, 6.0, 0.0, 3.0]);
        assert!(!style.has_decoration());
    }

    #[test]
    fn test_page_break() {
        assert_eq!(
            resolve_page_break(&attrs(&[("page-break-before", "always")])),
            Some(PageBreak::Before)
        );
        assert_eq!(
            resolve_page_break(&attrs(&[("break-before", "page")])),
            Some(PageBreak::Before)
        );
        assert_eq!(
            resolve_page_break(&attrs(&[("break-after", "odd-page")])),
            Some(PageBreak::After)
        );
        assert_eq!(resolve_page_break(&attrs(&[("break-before", "auto")])), None);
    }

    #[test]
    fn test_keep_flags() {
        let k = KeepFlags::resolve(&attrs(&[
            ("keep-together.within-page", "always"),
            ("keep-with-previous", "5"),
        ]));
        assert!(k.together);
        assert!(k.with_previous);
        assert!(!k.with_next);
        assert_eq!(KeepFlags::resolve(&attrs(&[("keep-with-next", "auto")])), KeepFlags::default());
    }

    #[test]
    fn test_decoration_detection() {
        assert!(BoxStyle::resolve(&attrs(&[("padding", "1pt")]), 12.0).has_decoration());
        assert!(BoxStyle::resolve(&attrs(&[("border-top", "1pt solid")]), 12.0).has_decoration());
        assert!(!BoxStyle::resolve(&attrs(&[("color", "red")]), 12.0).has_decoration());
    }
}
