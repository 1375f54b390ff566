//! Edge-indexed draw callbacks attached to tables.
//!
//! Horizontal edges are numbered `0..=rows` from the top, vertical edges `0..=cols`
//! from the left. The renderer calls these while drawing; serialization and equality
//! evaluate them over every edge of the owning table.

use folio_style::Margins;
use folio_types::Color;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A draw callback indexed by edge (lines) or by row/column (padding).
pub type EdgeFn<T> = Arc<dyn Fn(usize) -> T + Send + Sync>;

fn constant<T: Clone + Send + Sync + 'static>(value: T) -> EdgeFn<T> {
    Arc::new(move |_| value.clone())
}

fn indexed<T: Clone + Default + Send + Sync + 'static>(values: Vec<T>) -> EdgeFn<T> {
    Arc::new(move |i| values.get(i).cloned().unwrap_or_default())
}

/// Cell padding callbacks, shared by every cell of a homogeneous table.
#[derive(Clone)]
pub struct PaddingCallbacks {
    pub left: EdgeFn<f32>,
    pub top: EdgeFn<f32>,
    pub right: EdgeFn<f32>,
    pub bottom: EdgeFn<f32>,
}

impl PaddingCallbacks {
    /// The same padding for every cell.
    pub fn uniform(padding: Margins) -> Self {
        Self {
            left: constant(padding.left),
            top: constant(padding.top),
            right: constant(padding.right),
            bottom: constant(padding.bottom),
        }
    }

    pub fn zero() -> Self {
        Self::uniform(Margins::default())
    }
}

#[derive(Clone)]
pub struct TableLayout {
    pub rows: usize,
    pub cols: usize,
    pub h_line_width: EdgeFn<f32>,
    pub v_line_width: EdgeFn<f32>,
    pub h_line_color: EdgeFn<Option<Color>>,
    pub v_line_color: EdgeFn<Option<Color>>,
    pub padding: Option<PaddingCallbacks>,
}

impl TableLayout {
    /// Builds callbacks that look up precomputed per-edge values. Missing entries read
    /// as width 0 and no color.
    pub fn from_edges(
        rows: usize,
        cols: usize,
        h_widths: Vec<f32>,
        v_widths: Vec<f32>,
        h_colors: Vec<Option<Color>>,
        v_colors: Vec<Option<Color>>,
    ) -> Self {
        Self {
            rows,
            cols,
            h_line_width: indexed(h_widths),
            v_line_width: indexed(v_widths),
            h_line_color: indexed(h_colors),
            v_line_color: indexed(v_colors),
            padding: None,
        }
    }

    pub fn with_padding(mut self, padding: PaddingCallbacks) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn h_line_widths(&self) -> Vec<f32> {
        (0..=self.rows).map(|i| (self.h_line_width)(i)).collect()
    }

    pub fn v_line_widths(&self) -> Vec<f32> {
        (0..=self.cols).map(|i| (self.v_line_width)(i)).collect()
    }

    pub fn h_line_colors(&self) -> Vec<Option<Color>> {
        (0..=self.rows).map(|i| (self.h_line_color)(i)).collect()
    }

    pub fn v_line_colors(&self) -> Vec<Option<Color>> {
        (0..=self.cols).map(|i| (self.v_line_color)(i)).collect()
    }

    /// Padding per column (left/right) and per row (top/bottom), `[left, top, right, bottom]`.
    pub fn paddings(&self) -> Option<[Vec<f32>; 4]> {
        let p = self.padding.as_ref()?;
        let cols = |f: &EdgeFn<f32>| (0..self.cols).map(|i| f(i)).collect::<Vec<_>>();
        let rows = |f: &EdgeFn<f32>| (0..self.rows).map(|i| f(i)).collect::<Vec<_>>();
        Some([cols(&p.left), rows(&p.top), cols(&p.right), rows(&p.bottom)])
    }
}

impl PartialEq for TableLayout {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.h_line_widths() == other.h_line_widths()
            && self.v_line_widths() == other.v_line_widths()
            && self.h_line_colors() == other.h_line_colors()
            && self.v_line_colors() == other.v_line_colors()
            && self.paddings() == other.paddings()
    }
}

impl fmt::Debug for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableLayout")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("h_line_widths", &self.h_line_widths())
            .field("v_line_widths", &self.v_line_widths())
            .field("h_line_colors", &self.h_line_colors())
            .field("v_line_colors", &self.v_line_colors())
            .field("paddings", &self.paddings())
            .finish()
    }
}

impl Serialize for TableLayout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("hLineWidth", &self.h_line_widths())?;
        map.serialize_entry("vLineWidth", &self.v_line_widths())?;
        map.serialize_entry("hLineColor", &self.h_line_colors())?;
        map.serialize_entry("vLineColor", &self.v_line_colors())?;
        if let Some([left, top, right, bottom]) = self.paddings() {
            map.serialize_entry("paddingLeft", &left)?;
            map.serialize_entry("paddingTop", &top)?;
            map.serialize_entry("paddingRight", &right)?;
            map.serialize_entry("paddingBottom", &bottom)?;
        }
        map.end()
    }
}
