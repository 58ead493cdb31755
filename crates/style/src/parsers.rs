//! Low-level nom parser functions for CSS-like gradient values.
//!
//! Handles `linear-gradient(...)`, `radial-gradient(...)` and their
//! `repeating-` forms: the direction or shape header, and the color stops.

use crate::gradient::{
    DEFAULT_LINEAR_ANGLE, GradientColorStop, GradientDescriptor, RadialShape, RadialSize,
};
use folio_types::parse::{decimal, ws};
use folio_types::unit::parse_unit;
use folio_types::{Color, Point, TypeError, Unit};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, space1};
use nom::combinator::{all_consuming, map, map_opt, opt, value};
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },

    #[error(transparent)]
    Type(#[from] TypeError),
}

// --- Angles & Directions ---

/// An angle in degrees from `deg`, `grad`, `rad` or `turn` values.
pub fn parse_angle(input: &str) -> IResult<&str, f64> {
    map(
        (
            decimal,
            alt((
                value(1.0, tag_no_case("deg")),
                value(0.9, tag_no_case("grad")),
                value(180.0 / std::f64::consts::PI, tag_no_case("rad")),
                value(360.0, tag_no_case("turn")),
            )),
        ),
        |(amount, factor)| amount * factor,
    )
    .parse(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

fn side(input: &str) -> IResult<&str, Side> {
    alt((
        value(Side::Top, tag_no_case("top")),
        value(Side::Right, tag_no_case("right")),
        value(Side::Bottom, tag_no_case("bottom")),
        value(Side::Left, tag_no_case("left")),
    ))
    .parse(input)
}

fn side_angle(first: Side, second: Option<Side>) -> Option<f64> {
    use Side::*;
    match (first, second) {
        (Top, None) => Some(0.0),
        (Right, None) => Some(90.0),
        (Bottom, None) => Some(180.0),
        (Left, None) => Some(270.0),
        (Top, Some(Right)) | (Right, Some(Top)) => Some(45.0),
        (Bottom, Some(Right)) | (Right, Some(Bottom)) => Some(135.0),
        (Bottom, Some(Left)) | (Left, Some(Bottom)) => Some(225.0),
        (Top, Some(Left)) | (Left, Some(Top)) => Some(315.0),
        _ => None,
    }
}

/// `to <side>` or `to <side> <side>`, as an angle in degrees.
pub fn parse_direction(input: &str) -> IResult<&str, f64> {
    map_opt(
        preceded(
            (tag_no_case("to"), space1),
            (side, opt(preceded(space1, side))),
        ),
        |(first, second)| side_angle(first, second),
    )
    .parse(input)
}

// --- Radial Header ---

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RadialHeader {
    pub shape: RadialShape,
    pub size: RadialSize,
    pub center: Option<Point>,
}

fn radial_shape(input: &str) -> IResult<&str, RadialShape> {
    alt((
        value(RadialShape::Circle, tag_no_case("circle")),
        value(RadialShape::Ellipse, tag_no_case("ellipse")),
    ))
    .parse(input)
}

fn radial_size(input: &str) -> IResult<&str, RadialSize> {
    alt((
        value(RadialSize::ClosestSide, tag_no_case("closest-side")),
        value(RadialSize::ClosestCorner, tag_no_case("closest-corner")),
        value(RadialSize::FarthestSide, tag_no_case("farthest-side")),
        value(RadialSize::FarthestCorner, tag_no_case("farthest-corner")),
    ))
    .parse(input)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PositionPart {
    Horizontal(Unit),
    Vertical(Unit),
    Either(Unit),
}

fn position_part(input: &str) -> IResult<&str, PositionPart> {
    alt((
        value(PositionPart::Horizontal(Unit::percent(0.0)), tag_no_case("left")),
        value(PositionPart::Horizontal(Unit::percent(100.0)), tag_no_case("right")),
        value(PositionPart::Vertical(Unit::percent(0.0)), tag_no_case("top")),
        value(PositionPart::Vertical(Unit::percent(100.0)), tag_no_case("bottom")),
        value(PositionPart::Either(Unit::percent(50.0)), tag_no_case("center")),
        map(parse_unit, PositionPart::Either),
    ))
    .parse(input)
}

/// `<x> [<y>]` where each part is a unit or a position keyword. Keywords may
/// come in either order (`top left`); a missing part is centered.
pub fn parse_position(input: &str) -> IResult<&str, Point> {
    use PositionPart::*;
    map_opt(
        (position_part, opt(preceded(space1, position_part))),
        |(first, second)| {
            let center = Unit::percent(50.0);
            match (first, second) {
                (Vertical(y), None) => Some(Point::new(center, y)),
                (Horizontal(x) | Either(x), None) => Some(Point::new(x, center)),
                (Vertical(y), Some(Horizontal(x) | Either(x))) => Some(Point::new(x, y)),
                (Horizontal(x) | Either(x), Some(Vertical(y) | Either(y))) => {
                    Some(Point::new(x, y))
                }
                _ => None,
            }
        },
    )
    .parse(input)
}

/// Shape, size and `at <position>`, each optional but at least one present.
pub fn parse_radial_header(input: &str) -> IResult<&str, RadialHeader> {
    map_opt(
        (
            opt(ws(radial_shape)),
            opt(ws(radial_size)),
            opt(ws(radial_shape)),
            opt(preceded(ws(tag_no_case("at")), ws(parse_position))),
        ),
        |(shape_before, size, shape_after, center)| {
            if shape_before.is_some() && shape_after.is_some() {
                return None;
            }
            let shape = shape_before.or(shape_after);
            if shape.is_none() && size.is_none() && center.is_none() {
                return None;
            }
            Some(RadialHeader {
                shape: shape.unwrap_or_default(),
                size: size.unwrap_or_default(),
                center,
            })
        },
    )
    .parse(input)
}

// --- Color Stops ---

/// Splits on `separator` where it is not nested inside parentheses.
fn split_top_level(input: &str, separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && separator(c) => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

fn percentage(input: &str) -> IResult<&str, f64> {
    terminated(decimal, char('%')).parse(input)
}

/// A color with an optional percentage distance, e.g. `rgba(0,0,0,0.5) 25%`.
pub fn parse_color_stop(input: &str) -> Result<GradientColorStop, StyleParseError> {
    let trimmed = input.trim();
    let words: Vec<&str> = split_top_level(trimmed, char::is_whitespace)
        .into_iter()
        .filter(|w| !w.is_empty())
        .collect();

    let (color_text, distance) = match words.as_slice() {
        [] => return Err(StyleParseError::Parse("Empty gradient color stop".to_string())),
        [color] => (*color, None),
        [color, position] => {
            let distance = all_consuming(percentage)
                .parse(*position)
                .map(|(_, d)| d)
                .map_err(|_| StyleParseError::InvalidValue {
                    property: "gradient stop distance".to_string(),
                    value: position.to_string(),
                })?;
            (*color, Some(distance))
        }
        _ => {
            return Err(StyleParseError::InvalidValue {
                property: "gradient stop".to_string(),
                value: trimmed.to_string(),
            });
        }
    };

    let (color, opacity) = Color::parse_rgba(color_text)?;
    Ok(GradientColorStop {
        color,
        distance,
        opacity,
    })
}

// --- Gradient Functions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GradientKind {
    Linear,
    Radial,
}

fn gradient_prefix(input: &str) -> IResult<&str, (bool, GradientKind)> {
    (
        map(opt(tag_no_case("repeating-")), |r| r.is_some()),
        alt((
            value(GradientKind::Linear, tag_no_case("linear-gradient")),
            value(GradientKind::Radial, tag_no_case("radial-gradient")),
        )),
    )
    .parse(input)
}

/// Parses a full CSS gradient function into a descriptor.
pub fn parse_gradient(input: &str) -> Result<GradientDescriptor, StyleParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(StyleParseError::Parse("Empty gradient value".to_string()));
    }

    let (rest, (repeating, kind)) = terminated(gradient_prefix, ws(char('(')))
        .parse(trimmed)
        .map_err(|_| StyleParseError::Parse(format!("Not a gradient function: '{}'", input)))?;
    let body = rest.strip_suffix(')').ok_or_else(|| {
        StyleParseError::Parse(format!("Missing closing ')' in gradient: '{}'", input))
    })?;

    let mut tokens: Vec<&str> = split_top_level(body, |c| c == ',')
        .into_iter()
        .map(str::trim)
        .collect();

    let descriptor = match kind {
        GradientKind::Linear => {
            let angle = tokens
                .first()
                .and_then(|first| run_parser(alt((parse_angle, parse_direction)), *first).ok());
            if angle.is_some() {
                tokens.remove(0);
            }
            GradientDescriptor::Linear {
                angle_deg: angle.unwrap_or(DEFAULT_LINEAR_ANGLE),
                repeating,
                stops: parse_stops(&tokens)?,
            }
        }
        GradientKind::Radial => {
            let header = tokens
                .first()
                .and_then(|first| run_parser(parse_radial_header, *first).ok());
            if header.is_some() {
                tokens.remove(0);
            }
            let header = header.unwrap_or_default();
            GradientDescriptor::Radial {
                shape: header.shape,
                size_mode: header.size,
                repeating,
                stops: parse_stops(&tokens)?,
                center: header.center,
            }
        }
    };
    Ok(descriptor)
}

fn parse_stops(tokens: &[&str]) -> Result<Vec<GradientColorStop>, StyleParseError> {
    if tokens.is_empty() {
        return Err(StyleParseError::Parse(
            "A gradient needs at least one color stop".to_string(),
        ));
    }
    tokens.iter().map(|t| parse_color_stop(t)).collect()
}

/// Runs a nom parser over the whole input, converting failures and leftover
/// text into a [`StyleParseError`].
fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", value)) => Ok(value),
        Ok((rest, _)) => Err(StyleParseError::Parse(format!(
            "Unexpected trailing input '{}' in '{}'",
            rest, input
        ))),
        Err(e) => Err(StyleParseError::Parse(format!(
            "Failed to parse '{}': {}",
            input, e
        ))),
    }
}
