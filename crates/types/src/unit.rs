//! Tagged measurement values.
//!
//! A [`Unit`] carries a magnitude and a [`UnitKind`]. Absolute kinds (points,
//! inches, millimeters) convert freely between each other. Relative kinds
//! (percent, em, viewport, ...) only make sense against a reference value and
//! must be resolved with [`Unit::to_absolute`] before they can be mixed with
//! anything other than their own kind.

use crate::error::TypeError;
use crate::parse::{decimal, run_parser};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::space0;
use nom::combinator::{map, opt, value};
use nom::sequence::preceded;
use nom::{IResult, Parser};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::str::FromStr;

pub const POINTS_PER_INCH: f64 = 72.0;
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / 25.4;
/// CSS pixels are 1/96 of an inch.
pub const POINTS_PER_PIXEL: f64 = POINTS_PER_INCH / 96.0;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitKind {
    Points,
    Inches,
    Millimeters,
    Percent,
    EmHeight,
    ExHeight,
    RootEmHeight,
    ZeroWidth,
    ViewPortWidth,
    ViewPortHeight,
    ViewPortMin,
    ViewPortMax,
}

impl UnitKind {
    pub fn is_absolute(self) -> bool {
        matches!(
            self,
            UnitKind::Points | UnitKind::Inches | UnitKind::Millimeters
        )
    }

    pub fn is_relative(self) -> bool {
        !self.is_absolute()
    }

    /// The suffix used when rendering a value of this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            UnitKind::Points => "pt",
            UnitKind::Inches => "in",
            UnitKind::Millimeters => "mm",
            UnitKind::Percent => "%",
            UnitKind::EmHeight => "em",
            UnitKind::ExHeight => "ex",
            UnitKind::RootEmHeight => "rem",
            UnitKind::ZeroWidth => "ch",
            UnitKind::ViewPortWidth => "vw",
            UnitKind::ViewPortHeight => "vh",
            UnitKind::ViewPortMin => "vmin",
            UnitKind::ViewPortMax => "vmax",
        }
    }

    fn points_per_unit(self) -> Option<f64> {
        match self {
            UnitKind::Points => Some(1.0),
            UnitKind::Inches => Some(POINTS_PER_INCH),
            UnitKind::Millimeters => Some(POINTS_PER_MM),
            _ => None,
        }
    }
}

/// A measurement value with its unit kind.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    pub value: f64,
    pub kind: UnitKind,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::ZERO
    }
}

impl Unit {
    pub const ZERO: Unit = Unit::pt(0.0);

    pub const fn new(value: f64, kind: UnitKind) -> Self {
        Self { value, kind }
    }

    pub const fn pt(value: f64) -> Self {
        Self::new(value, UnitKind::Points)
    }

    pub const fn inch(value: f64) -> Self {
        Self::new(value, UnitKind::Inches)
    }

    pub const fn mm(value: f64) -> Self {
        Self::new(value, UnitKind::Millimeters)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, UnitKind::Percent)
    }

    pub const fn em(value: f64) -> Self {
        Self::new(value, UnitKind::EmHeight)
    }

    pub const fn ex(value: f64) -> Self {
        Self::new(value, UnitKind::ExHeight)
    }

    pub const fn rem(value: f64) -> Self {
        Self::new(value, UnitKind::RootEmHeight)
    }

    pub const fn ch(value: f64) -> Self {
        Self::new(value, UnitKind::ZeroWidth)
    }

    pub const fn vw(value: f64) -> Self {
        Self::new(value, UnitKind::ViewPortWidth)
    }

    pub const fn vh(value: f64) -> Self {
        Self::new(value, UnitKind::ViewPortHeight)
    }

    pub const fn vmin(value: f64) -> Self {
        Self::new(value, UnitKind::ViewPortMin)
    }

    pub const fn vmax(value: f64) -> Self {
        Self::new(value, UnitKind::ViewPortMax)
    }

    pub fn is_absolute(&self) -> bool {
        self.kind.is_absolute()
    }

    pub fn is_relative(&self) -> bool {
        self.kind.is_relative()
    }

    pub fn is_zero(&self) -> bool {
        self.value.abs() < EPSILON
    }

    /// The value in points. Fails for relative units.
    pub fn to_points(&self) -> Result<f64, TypeError> {
        self.kind
            .points_per_unit()
            .map(|factor| self.value * factor)
            .ok_or(TypeError::RelativeUnit {
                operation: "convert",
                kind: self.kind,
            })
    }

    pub fn to_inches(&self) -> Result<f64, TypeError> {
        Ok(self.to_points()? / POINTS_PER_INCH)
    }

    pub fn to_millimeters(&self) -> Result<f64, TypeError> {
        Ok(self.to_points()? / POINTS_PER_MM)
    }

    /// Converts between absolute kinds. Converting to the unit's own kind
    /// always succeeds, even for relative units.
    pub fn convert(&self, kind: UnitKind) -> Result<Unit, TypeError> {
        if kind == self.kind {
            return Ok(*self);
        }
        let points = self.to_points()?;
        let factor = kind.points_per_unit().ok_or(TypeError::IncompatibleUnits {
            operation: "convert",
            left: self.kind,
            right: kind,
        })?;
        Ok(Unit::new(points / factor, kind))
    }

    /// Brings two operands onto a common kind: the shared kind when they
    /// match, points when both are absolute.
    fn align(&self, other: &Unit, operation: &'static str) -> Result<(f64, f64, UnitKind), TypeError> {
        if self.kind == other.kind {
            return Ok((self.value, other.value, self.kind));
        }
        if self.is_absolute() && other.is_absolute() {
            return Ok((self.to_points()?, other.to_points()?, UnitKind::Points));
        }
        Err(TypeError::IncompatibleUnits {
            operation,
            left: self.kind,
            right: other.kind,
        })
    }

    pub fn try_add(&self, other: &Unit) -> Result<Unit, TypeError> {
        let (a, b, kind) = self.align(other, "add")?;
        Ok(Unit::new(a + b, kind))
    }

    pub fn try_sub(&self, other: &Unit) -> Result<Unit, TypeError> {
        let (a, b, kind) = self.align(other, "subtract")?;
        Ok(Unit::new(a - b, kind))
    }

    /// Compares two units, treating values within 1e-9 as equal.
    pub fn try_cmp(&self, other: &Unit) -> Result<Ordering, TypeError> {
        let (a, b, _) = self.align(other, "compare")?;
        if (a - b).abs() < EPSILON {
            Ok(Ordering::Equal)
        } else {
            Ok(a.total_cmp(&b))
        }
    }

    pub fn try_min(&self, other: &Unit) -> Result<Unit, TypeError> {
        match self.try_cmp(other)? {
            Ordering::Greater => Ok(*other),
            _ => Ok(*self),
        }
    }

    pub fn try_max(&self, other: &Unit) -> Result<Unit, TypeError> {
        match self.try_cmp(other)? {
            Ordering::Less => Ok(*other),
            _ => Ok(*self),
        }
    }

    /// Resolves a relative unit against `reference`, which must be absolute.
    ///
    /// Percent, viewport, `ex` and `ch` values are fractions of the reference
    /// (`value / 100`), while `em` and `rem` are multiples of it. The result
    /// takes the reference's kind. Absolute units are returned unchanged.
    pub fn to_absolute(&self, reference: &Unit) -> Result<Unit, TypeError> {
        if self.is_absolute() {
            return Ok(*self);
        }
        if reference.is_relative() {
            return Err(TypeError::RelativeUnit {
                operation: "resolve against",
                kind: reference.kind,
            });
        }
        let value = match self.kind {
            UnitKind::EmHeight | UnitKind::RootEmHeight => reference.value * self.value,
            _ => reference.value * self.value / 100.0,
        };
        Ok(Unit::new(value, reference.kind))
    }

    pub fn parse(input: &str) -> Result<Unit, TypeError> {
        input.parse()
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.try_cmp(other), Ok(Ordering::Equal))
    }
}

/// Incompatible units have no ordering; use [`Unit::try_cmp`] to get the error.
impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Neg for Unit {
    type Output = Unit;

    fn neg(self) -> Unit {
        Unit::new(-self.value, self.kind)
    }
}

impl Mul<f64> for Unit {
    type Output = Unit;

    fn mul(self, rhs: f64) -> Unit {
        Unit::new(self.value * rhs, self.kind)
    }
}

impl Div<f64> for Unit {
    type Output = Unit;

    fn div(self, rhs: f64) -> Unit {
        Unit::new(self.value / rhs, self.kind)
    }
}

/// Formats a number with at most four decimals, trimming trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.kind.suffix())
    }
}

// --- Parsing ---

const FONT_SIZE_KEYWORDS: [(&str, f64); 8] = [
    ("xx-small", 6.0),
    ("x-small", 7.5),
    ("small", 10.0),
    ("medium", 12.0),
    ("large", 14.0),
    ("x-large", 18.0),
    ("xx-large", 24.0),
    ("xxx-large", 32.0),
];

/// Suffix to kind, plus the factor applied to the number (only `px` scales).
fn unit_suffix(input: &str) -> IResult<&str, (UnitKind, f64)> {
    alt((
        value((UnitKind::ViewPortMin, 1.0), tag_no_case("vmin")),
        value((UnitKind::ViewPortMax, 1.0), tag_no_case("vmax")),
        value((UnitKind::ViewPortWidth, 1.0), tag_no_case("vw")),
        value((UnitKind::ViewPortHeight, 1.0), tag_no_case("vh")),
        value((UnitKind::RootEmHeight, 1.0), tag_no_case("rem")),
        value((UnitKind::EmHeight, 1.0), tag_no_case("em")),
        value((UnitKind::ExHeight, 1.0), tag_no_case("ex")),
        value((UnitKind::ZeroWidth, 1.0), tag_no_case("ch")),
        value((UnitKind::Points, 1.0), tag_no_case("pt")),
        value((UnitKind::Points, POINTS_PER_PIXEL), tag_no_case("px")),
        value((UnitKind::Inches, 1.0), tag_no_case("in")),
        value((UnitKind::Millimeters, 1.0), tag_no_case("mm")),
        value((UnitKind::Percent, 1.0), tag_no_case("%")),
    ))
    .parse(input)
}

/// Parses a number with an optional suffix; a bare number is in points.
pub fn parse_unit(input: &str) -> IResult<&str, Unit> {
    map(
        (decimal, opt(preceded(space0, unit_suffix))),
        |(number, suffix)| {
            let (kind, factor) = suffix.unwrap_or((UnitKind::Points, 1.0));
            Unit::new(number * factor, kind)
        },
    )
    .parse(input)
}

impl FromStr for Unit {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some((_, size)) = FONT_SIZE_KEYWORDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Unit::pt(*size));
        }
        run_parser(
            parse_unit,
            trimmed,
            "unit",
            "nnn[.nnn](pt|px|in|mm|%|em|ex|rem|ch|vw|vh|vmin|vmax)",
        )
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum UnitDef {
            Str(String),
            Num(f64),
            Map { value: f64, kind: UnitKind },
        }

        match UnitDef::deserialize(deserializer)? {
            UnitDef::Str(s) => s.parse().map_err(de::Error::custom),
            UnitDef::Num(n) => Ok(Unit::pt(n)),
            UnitDef::Map { value, kind } => Ok(Unit::new(value, kind)),
        }
    }
}
