//! Defines primitives for lengths, box spacing and table column widths.
use serde::{Serialize, Serializer};
use std::fmt;

/// Points per CSS pixel.
pub const PX_TO_PT: f32 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Pt,
    Px,
    In,
    Cm,
    Mm,
    Em,
    Rem,
    Percent,
}

/// A parsed length. A missing unit means points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: Option<Unit>,
}

impl Length {
    pub fn pt(value: f32) -> Self {
        Self {
            value,
            unit: Some(Unit::Pt),
        }
    }

    /// Converts to points. Relative units (`em`, `rem`, `%`) resolve against `em_basis`.
    pub fn to_pt(self, em_basis: f32) -> f32 {
        match self.unit {
            None | Some(Unit::Pt) => self.value,
            Some(Unit::Px) => self.value * PX_TO_PT,
            Some(Unit::In) => self.value * 72.0,
            Some(Unit::Cm) => self.value * 28.3465,
            Some(Unit::Mm) => self.value * 2.83465,
            Some(Unit::Em) | Some(Unit::Rem) => self.value * em_basis,
            Some(Unit::Percent) => self.value / 100.0 * em_basis,
        }
    }

    pub fn is_unitless(&self) -> bool {
        self.unit.is_none()
    }
}

/// Expands a 1–4 value CSS box shorthand into `(top, right, bottom, left)`.
pub fn expand_box<T: Clone>(values: &[T]) -> Option<(T, T, T, T)> {
    match values {
        [a] => Some((a.clone(), a.clone(), a.clone(), a.clone())),
        [v, h] => Some((v.clone(), h.clone(), v.clone(), h.clone())),
        [t, h, b] => Some((t.clone(), h.clone(), b.clone(), h.clone())),
        [t, r, b, l] => Some((t.clone(), r.clone(), b.clone(), l.clone())),
        _ => None,
    }
}

/// Box spacing (margin or padding) in points.
///
/// Serializes as `[left, top, right, bottom]`, the order the renderer expects.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Builds margins from CSS-ordered shorthand values (1 to 4 of them).
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        expand_box(values).map(|(top, right, bottom, left)| Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn is_zero(&self) -> bool {
        self.to_array().iter().all(|v| *v == 0.0)
    }
}

impl Serialize for Margins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

/// A table column width as handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWidth {
    /// Share the remaining width (`*`).
    Star,
    Percent(f32),
    /// A declaration passed through as written.
    Raw(String),
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnWidth::Star => write!(f, "*"),
            ColumnWidth::Percent(p) => write!(f, "{}%", trim_float(*p)),
            ColumnWidth::Raw(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for ColumnWidth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Formats with at most four decimals and no trailing zeros.
fn trim_float(v: f32) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        assert_eq!(Length::pt(12.0).to_pt(12.0), 12.0);
        let px = Length {
            value: 16.0,
            unit: Some(Unit::Px),
        };
        assert_eq!(px.to_pt(12.0), 12.0);
        let em = Length {
            value: 2.0,
            unit: Some(Unit::Em),
        };
        assert_eq!(em.to_pt(12.0), 24.0);
        assert_eq!(em.to_pt(10.0), 20.0);
    }

    #[test]
    fn test_margins_shorthand() {
        assert_eq!(Margins::from_shorthand(&[5.0]).unwrap(), Margins::all(5.0));
        assert_eq!(
            Margins::from_shorthand(&[1.0, 2.0]).unwrap().to_array(),
            [2.0, 1.0, 2.0, 1.0]
        );
        assert_eq!(
            Margins::from_shorthand(&[1.0, 2.0, 3.0]).unwrap().to_array(),
            [2.0, 1.0, 2.0, 3.0]
        );
        assert_eq!(
            Margins::from_shorthand(&[1.0, 2.0, 3.0, 4.0])
                .unwrap()
                .to_array(),
            [4.0, 1.0, 2.0, 3.0]
        );
        assert!(Margins::from_shorthand(&[]).is_none());
        assert!(Margins::from_shorthand(&[1.0; 5]).is_none());
    }

    #[test]
    fn test_column_width_display() {
        assert_eq!(ColumnWidth::Star.to_string(), "*");
        assert_eq!(ColumnWidth::Percent(25.0).to_string(), "25%");
        assert_eq!(ColumnWidth::Percent(100.0 / 3.0).to_string(), "33.3333%");
        assert_eq!(ColumnWidth::Raw("30mm".into()).to_string(), "30mm");
    }
}
