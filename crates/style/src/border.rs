//! Border declarations and the four-tier border cascade.
//!
//! Each side resolves width, color and style independently. From lowest to highest
//! precedence the tiers are: the `border` shorthand, the general longhands
//! (`border-width`, `border-color`, `border-style`, each taking 1–4 box values),
//! the per-side shorthand (`border-top`), and the per-side longhands
//! (`border-top-width`). A shorthand only sets the components it actually names.
//! FO side names (`before`, `after`, `start`, `end`) are accepted at the same tier as
//! their CSS counterparts, with the CSS name applied last.

use crate::dimension::expand_box;
use crate::parsers::{parse_border_style, parse_border_width, run_parser, split_tokens};
use folio_types::{Attributes, Color};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    None,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn css_name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    pub fn fo_name(self) -> &'static str {
        match self {
            Side::Top => "before",
            Side::Bottom => "after",
            Side::Left => "start",
            Side::Right => "end",
        }
    }

    /// Attribute names for `<prefix>-<side><suffix>`, FO alias first.
    pub fn attr_names(self, prefix: &str, suffix: &str) -> [String; 2] {
        [
            format!("{}-{}{}", prefix, self.fo_name(), suffix),
            format!("{}-{}{}", prefix, self.css_name(), suffix),
        ]
    }
}

/// The declared state of one border side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderSide {
    pub width: Option<f32>,
    pub color: Option<Color>,
    pub style: Option<BorderStyle>,
}

impl BorderSide {
    /// Width used when a side is declared without an explicit width.
    pub const DEFAULT_WIDTH: f32 = 0.5;

    /// Reads a shorthand such as `1pt solid #000`. Tokens may come in any order;
    /// unrecognized tokens are dropped.
    pub fn from_shorthand(value: &str, em_basis: f32) -> Self {
        let mut side = BorderSide::default();
        for token in split_tokens(value) {
            if let Ok(width) = run_parser(parse_border_width, token) {
                side.width = Some(width.to_pt(em_basis));
            } else if let Ok(style) = parse_border_style(token) {
                side.style = Some(style);
            } else if let Some(color) = Color::parse(token) {
                side.color = Some(color);
            } else {
                debug!("Ignoring unrecognized border token '{}'", token);
            }
        }
        side
    }

    /// Copies every component `other` declares over this side.
    pub fn overlay(&mut self, other: &BorderSide) {
        if other.width.is_some() {
            self.width = other.width;
        }
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.style.is_some() {
            self.style = other.style;
        }
    }

    pub fn is_declared(&self) -> bool {
        self.width.is_some() || self.color.is_some() || self.style.is_some()
    }

    /// The width the renderer should draw. Undeclared sides and `none`/`hidden`
    /// styles resolve to 0.
    pub fn resolved_width(&self) -> f32 {
        if matches!(self.style, Some(BorderStyle::None) | Some(BorderStyle::Hidden)) {
            return 0.0;
        }
        match self.width {
            Some(w) => w.max(0.0),
            None if self.is_declared() => Self::DEFAULT_WIDTH,
            None => 0.0,
        }
    }

    pub fn is_drawn(&self) -> bool {
        self.resolved_width() > 0.0
    }
}

/// The resolved border state of all four sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Borders {
    pub top: BorderSide,
    pub bottom: BorderSide,
    pub left: BorderSide,
    pub right: BorderSide,
}

impl Borders {
    /// Runs the border cascade over an element's attributes.
    pub fn resolve(attrs: &Attributes, em_basis: f32) -> Self {
        let mut borders = Borders::default();

        if let Some(value) = attrs.get("border") {
            let shorthand = BorderSide::from_shorthand(value, em_basis);
            for side in Side::ALL {
                borders.side_mut(side).overlay(&shorthand);
            }
        }

        if let Some(value) = attrs.get("border-width") {
            let widths = box_values(value, |t| {
                run_parser(parse_border_width, t)
                    .ok()
                    .map(|l| l.to_pt(em_basis))
            });
            borders.apply_box(widths, |side, w| side.width = Some(w));
        }
        if let Some(value) = attrs.get("border-color") {
            borders.apply_box(box_values(value, Color::parse), |side, c| {
                side.color = Some(c)
            });
        }
        if let Some(value) = attrs.get("border-style") {
            let styles = box_values(value, |t| parse_border_style(t).ok());
            borders.apply_box(styles, |side, s| side.style = Some(s));
        }

        for side in Side::ALL {
            for name in side.attr_names("border", "") {
                if let Some(value) = attrs.get(&name) {
                    let shorthand = BorderSide::from_shorthand(value, em_basis);
                    borders.side_mut(side).overlay(&shorthand);
                }
            }
        }

        for side in Side::ALL {
            let target = borders.side_mut(side);
            for name in side.attr_names("border", "-width") {
                if let Some(value) = attrs.get(&name) {
                    match run_parser(parse_border_width, value) {
                        Ok(width) => target.width = Some(width.to_pt(em_basis)),
                        Err(e) => debug!("Ignoring {}='{}': {}", name, value, e),
                    }
                }
            }
            for name in side.attr_names("border", "-color") {
                if let Some(color) = attrs.get(&name).and_then(Color::parse) {
                    target.color = Some(color);
                }
            }
            for name in side.attr_names("border", "-style") {
                if let Some(style) = attrs.get(&name).and_then(|v| parse_border_style(v).ok()) {
                    target.style = Some(style);
                }
            }
        }

        borders
    }

    pub fn side(&self, side: Side) -> &BorderSide {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BorderSide {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Whether any side declares anything at all.
    pub fn is_declared(&self) -> bool {
        Side::ALL.iter().any(|s| self.side(*s).is_declared())
    }

    /// Drawn flags in `[left, top, right, bottom]` order.
    pub fn flags(&self) -> [bool; 4] {
        [
            self.left.is_drawn(),
            self.top.is_drawn(),
            self.right.is_drawn(),
            self.bottom.is_drawn(),
        ]
    }

    /// Resolved widths in `[left, top, right, bottom]` order.
    pub fn widths(&self) -> [f32; 4] {
        [
            self.left.resolved_width(),
            self.top.resolved_width(),
            self.right.resolved_width(),
            self.bottom.resolved_width(),
        ]
    }

    fn apply_box<T: Clone>(
        &mut self,
        values: Option<(T, T, T, T)>,
        set: impl Fn(&mut BorderSide, T),
    ) {
        if let Some((top, right, bottom, left)) = values {
            set(&mut self.top, top);
            set(&mut self.right, right);
            set(&mut self.bottom, bottom);
            set(&mut self.left, left);
        }
    }
}

/// Parses every token of a 1–4 value declaration; any unparseable token voids the whole
/// declaration.
fn box_values<T: Clone>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<(T, T, T, T)> {
    let parsed: Option<Vec<T>> = split_tokens(value).into_iter().map(parse).collect();
    match parsed {
        Some(values) => expand_box(&values),
        None => {
            debug!("Ignoring box declaration '{}'", value);
            None
        }
    }
}
