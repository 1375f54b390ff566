// src/config.rs
//! Cascade rule sets and compile options.
//!
//! Rule sets are plain data: which tag owns a group of inheritable attributes and
//! which descendant tags receive them. They load from JSON and merge in order.

use crate::error::FolioError;
use folio_style::StyleContext;
use serde::{Deserialize, Serialize};

/// Text attributes the built-in rule sets propagate.
pub const INHERITABLE_TEXT_ATTRIBUTES: [&str; 8] = [
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "color",
    "text-align",
    "line-height",
    "text-decoration",
];

/// One inheritance rule: values of `inheritable_attributes` on a `tag` element flow
/// down into descendants as long as every element on the path is an inheriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeRule {
    pub tag: String,
    #[serde(default)]
    pub inheriters: Vec<String>,
    #[serde(default)]
    pub inheritable_attributes: Vec<String>,
}

impl CascadeRule {
    pub fn new<S: AsRef<str>>(tag: &str, inheriters: &[S], attributes: &[S]) -> Self {
        Self {
            tag: tag.to_string(),
            inheriters: inheriters.iter().map(|s| s.as_ref().to_string()).collect(),
            inheritable_attributes: attributes.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn is_inheriter(&self, tag: &str) -> bool {
        self.inheriters.iter().any(|t| t == tag)
    }
}

/// An ordered list of cascade rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<CascadeRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<CascadeRule>) -> Self {
        Self { rules }
    }

    /// Loads a rule set from either `{"rules": [...]}` or a bare array of rules.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Wrapped(RuleSet),
            Bare(Vec<CascadeRule>),
        }
        let repr: Repr = serde_json::from_str(json).map_err(|e| {
            FolioError::Config(format!("Invalid cascade rule set: {}", e))
        })?;
        Ok(match repr {
            Repr::Wrapped(set) => set,
            Repr::Bare(rules) => RuleSet { rules },
        })
    }

    /// Appends `other`'s rules after this set's rules.
    pub fn merge(mut self, other: RuleSet) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `block` passes text attributes to nested blocks and inlines.
    pub fn block_inheritance() -> Self {
        Self::new(vec![CascadeRule::new(
            "block",
            &["block", "inline"],
            &INHERITABLE_TEXT_ATTRIBUTES,
        )])
    }

    /// `table-cell` passes text attributes to the blocks and inlines it holds.
    pub fn table_cell_inheritance() -> Self {
        Self::new(vec![CascadeRule::new(
            "table-cell",
            &["block", "inline"],
            &INHERITABLE_TEXT_ATTRIBUTES,
        )])
    }

    /// `table` passes text attributes down through its row groups to the cells.
    pub fn table_inheritance() -> Self {
        Self::new(vec![CascadeRule::new(
            "table",
            &[
                "table-header",
                "table-body",
                "table-footer",
                "table-row",
                "table-cell",
            ],
            &INHERITABLE_TEXT_ATTRIBUTES,
        )])
    }

    pub fn defaults() -> Self {
        Self::block_inheritance()
            .merge(Self::table_cell_inheritance())
            .merge(Self::table_inheritance())
    }
}

/// Knobs for one compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Font size in points that `em`/`rem` resolve against outside any sized ancestor.
    pub base_font_size: f32,
    /// Divisor for absolute line heights when no font size is known.
    pub line_height_base: f32,
    /// Table width in percent that proportional column widths share.
    pub default_table_width: f32,
    pub rules: RuleSet,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            base_font_size: 12.0,
            line_height_base: 10.0,
            default_table_width: 100.0,
            rules: RuleSet::defaults(),
        }
    }
}

impl CompileOptions {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The sizing context at the document root.
    pub fn style_context(&self) -> StyleContext {
        StyleContext {
            font_size: None,
            base_font_size: self.base_font_size,
            line_height_base: self.line_height_base,
        }
    }
}
