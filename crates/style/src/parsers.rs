//! Low-level nom parser functions for CSS-like style values.
//!
//! This module provides composable parser functions for lengths, box shorthands,
//! border tokens and column width declarations, plus the keyword parsers the
//! resolvers build on. Keyword parsers return errors for unknown values; the
//! resolvers turn those into "absent".

use crate::border::BorderStyle;
use crate::dimension::{Length, Unit};
use crate::font::{FontStyle, FontWeight};
use crate::text::{TextAlign, TextDecoration};
use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::{char, digit1, multispace0, multispace1};
use nom::combinator::{map, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error("Float parse error: {0}")]
    FloatParse(String),
}

impl StyleParseError {
    fn invalid(property: &str, value: &str) -> Self {
        StyleParseError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

// --- Helper Parsers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses a signed decimal number without exponent (`12`, `-0.5`, `.75`).
///
/// Exponents are deliberately not accepted so that `1em` is read as one em.
pub fn parse_number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize(pair(
            opt(alt((char('+'), char('-')))),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

// --- Unit & Length Parsers ---

fn parse_unit(input: &str) -> IResult<&str, Unit> {
    alt((
        value(Unit::Pt, tag_no_case("pt")),
        value(Unit::Px, tag_no_case("px")),
        value(Unit::In, tag_no_case("in")),
        value(Unit::Cm, tag_no_case("cm")),
        value(Unit::Mm, tag_no_case("mm")),
        value(Unit::Rem, tag_no_case("rem")),
        value(Unit::Em, tag_no_case("em")),
        value(Unit::Percent, tag("%")),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1.5em", "10").
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    map(pair(parse_number, opt(parse_unit)), |(value, unit)| Length {
        value,
        unit,
    })
    .parse(input)
}

/// Parses a whitespace separated list of lengths, as used by box shorthands.
pub fn parse_length_list(input: &str) -> IResult<&str, Vec<Length>> {
    separated_list1(multispace1, parse_length).parse(input)
}

/// Parses `proportional-column-width(n)`, returning `n`.
pub fn parse_proportional_column_width(input: &str) -> IResult<&str, f32> {
    preceded(
        tag_no_case("proportional-column-width"),
        delimited(ws(char('(')), ws(parse_number), char(')')),
    )
    .parse(input)
}

/// Parses a border width: a length or one of the `thin`/`medium`/`thick` keywords.
pub fn parse_border_width(input: &str) -> IResult<&str, Length> {
    alt((
        value(Length::pt(0.5), tag_no_case("thin")),
        value(Length::pt(1.0), tag_no_case("medium")),
        value(Length::pt(2.0), tag_no_case("thick")),
        parse_length,
    ))
    .parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

/// Splits a declaration into whitespace separated tokens, keeping parenthesized
/// groups such as `rgb(0, 0, 0)` together.
pub fn split_tokens(input: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&input[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&input[s..]);
    }
    tokens
}

// --- High-level Parse Functions ---

/// Parses a font weight string (e.g., "bold", "600").
pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "normal" => Ok(FontWeight::Normal),
        "bold" => Ok(FontWeight::Bold),
        "bolder" => Ok(FontWeight::Bolder),
        "lighter" => Ok(FontWeight::Lighter),
        other => other
            .parse::<u16>()
            .map(FontWeight::Numeric)
            .map_err(|_| StyleParseError::invalid("font-weight", s)),
    }
}

/// Parses a font style string (e.g., "normal", "italic").
pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "normal" => Ok(FontStyle::Normal),
        "italic" => Ok(FontStyle::Italic),
        "oblique" => Ok(FontStyle::Oblique),
        _ => Err(StyleParseError::invalid("font-style", s)),
    }
}

/// Parses a text-align value. `start`/`end` map to left/right.
pub fn parse_text_align(s: &str) -> Result<TextAlign, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "left" | "start" => Ok(TextAlign::Left),
        "right" | "end" => Ok(TextAlign::Right),
        "center" => Ok(TextAlign::Center),
        "justify" => Ok(TextAlign::Justify),
        _ => Err(StyleParseError::invalid("text-align", s)),
    }
}

/// Parses a text-decoration value. `none` is reported as `Ok(None)`.
pub fn parse_text_decoration(s: &str) -> Result<Option<TextDecoration>, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "underline" => Ok(Some(TextDecoration::Underline)),
        "line-through" => Ok(Some(TextDecoration::LineThrough)),
        "overline" => Ok(Some(TextDecoration::Overline)),
        "none" => Ok(None),
        _ => Err(StyleParseError::invalid("text-decoration", s)),
    }
}

/// Parses a border style keyword.
pub fn parse_border_style(s: &str) -> Result<BorderStyle, StyleParseError> {
    match s.trim().to_lowercase().as_str() {
        "solid" => Ok(BorderStyle::Solid),
        "dashed" => Ok(BorderStyle::Dashed),
        "dotted" => Ok(BorderStyle::Dotted),
        "double" => Ok(BorderStyle::Double),
        "groove" => Ok(BorderStyle::Groove),
        "ridge" => Ok(BorderStyle::Ridge),
        "inset" => Ok(BorderStyle::Inset),
        "outset" => Ok(BorderStyle::Outset),
        "none" => Ok(BorderStyle::None),
        "hidden" => Ok(BorderStyle::Hidden),
        _ => Err(StyleParseError::invalid("border-style", s)),
    }
}
