use crate::error::TypeError;
use crate::parse::{run_parser, ws};
use crate::unit::{Unit, parse_unit};
use nom::Parser;
use nom::character::complete::{char, space1};
use nom::combinator::opt;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Chains component comparisons, stopping at the first non-equal result.
fn compare_all(pairs: &[(&Unit, &Unit)]) -> Result<Ordering, TypeError> {
    for (a, b) in pairs {
        match a.try_cmp(b)? {
            Ordering::Equal => continue,
            other => return Ok(other),
        }
    }
    Ok(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Unit,
    pub y: Unit,
}

impl Point {
    pub const ZERO: Point = Point {
        x: Unit::ZERO,
        y: Unit::ZERO,
    };

    pub fn new(x: Unit, y: Unit) -> Self {
        Self { x, y }
    }

    /// A point in points.
    pub fn pt(x: f64, y: f64) -> Self {
        Self::new(Unit::pt(x), Unit::pt(y))
    }

    pub fn offset(&self, dx: Unit, dy: Unit) -> Result<Point, TypeError> {
        Ok(Point::new(self.x.try_add(&dx)?, self.y.try_add(&dy)?))
    }

    pub fn try_add(&self, other: &Point) -> Result<Point, TypeError> {
        self.offset(other.x, other.y)
    }

    pub fn try_sub(&self, other: &Point) -> Result<Point, TypeError> {
        Ok(Point::new(self.x.try_sub(&other.x)?, self.y.try_sub(&other.y)?))
    }

    /// Both coordinates in points.
    pub fn to_points(&self) -> Result<(f64, f64), TypeError> {
        Ok((self.x.to_points()?, self.y.to_points()?))
    }

    pub fn try_cmp(&self, other: &Point) -> Result<Ordering, TypeError> {
        compare_all(&[(&self.x, &other.x), (&self.y, &other.y)])
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: Unit,
    pub height: Unit,
}

impl Size {
    pub fn new(width: Unit, height: Unit) -> Self {
        Self { width, height }
    }

    pub fn pt(width: f64, height: f64) -> Self {
        Self::new(Unit::pt(width), Unit::pt(height))
    }

    pub fn zero() -> Self {
        Self::pt(0.0, 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width.is_zero() && self.height.is_zero()
    }

    pub fn try_add(&self, other: &Size) -> Result<Size, TypeError> {
        Ok(Size::new(
            self.width.try_add(&other.width)?,
            self.height.try_add(&other.height)?,
        ))
    }

    pub fn try_sub(&self, other: &Size) -> Result<Size, TypeError> {
        Ok(Size::new(
            self.width.try_sub(&other.width)?,
            self.height.try_sub(&other.height)?,
        ))
    }

    pub fn try_cmp(&self, other: &Size) -> Result<Ordering, TypeError> {
        compare_all(&[(&self.width, &other.width), (&self.height, &other.height)])
    }
}

impl PartialOrd for Size {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.width, self.height)
    }
}

/// An axis-aligned rectangle. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: Unit,
    pub y: Unit,
    pub width: Unit,
    pub height: Unit,
}

impl Rect {
    pub fn new(x: Unit, y: Unit, width: Unit, height: Unit) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn pt(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Unit::pt(x), Unit::pt(y), Unit::pt(width), Unit::pt(height))
    }

    pub fn from_location_size(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    pub fn empty() -> Self {
        Self::pt(0.0, 0.0, 0.0, 0.0)
    }

    /// True only when both the width and the height are zero.
    pub fn is_empty(&self) -> bool {
        self.width.is_zero() && self.height.is_zero()
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> Result<Unit, TypeError> {
        self.x.try_add(&self.width)
    }

    pub fn bottom(&self) -> Result<Unit, TypeError> {
        self.y.try_add(&self.height)
    }

    /// The smallest rectangle enclosing every point, or [`Rect::empty`] for none.
    pub fn bounds(points: &[Point]) -> Result<Rect, TypeError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(Rect::empty());
        };
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in rest {
            min_x = min_x.try_min(&p.x)?;
            min_y = min_y.try_min(&p.y)?;
            max_x = max_x.try_max(&p.x)?;
            max_y = max_y.try_max(&p.y)?;
        }
        Ok(Rect::new(
            min_x,
            min_y,
            max_x.try_sub(&min_x)?,
            max_y.try_sub(&min_y)?,
        ))
    }

    /// Whether the point lies inside; the right and bottom edges are exclusive.
    pub fn contains(&self, point: &Point) -> Result<bool, TypeError> {
        Ok(self.x.try_cmp(&point.x)? != Ordering::Greater
            && point.x.try_cmp(&self.right()?)? == Ordering::Less
            && self.y.try_cmp(&point.y)? != Ordering::Greater
            && point.y.try_cmp(&self.bottom()?)? == Ordering::Less)
    }

    pub fn offset(&self, dx: Unit, dy: Unit) -> Result<Rect, TypeError> {
        Ok(Rect::new(
            self.x.try_add(&dx)?,
            self.y.try_add(&dy)?,
            self.width,
            self.height,
        ))
    }

    /// Grows the width and height, keeping the location.
    pub fn inflate(&self, width: Unit, height: Unit) -> Result<Rect, TypeError> {
        Ok(Rect::new(
            self.x,
            self.y,
            self.width.try_add(&width)?,
            self.height.try_add(&height)?,
        ))
    }

    /// Shrinks the rectangle by the thickness on every side.
    pub fn inset(&self, thickness: &Thickness) -> Result<Rect, TypeError> {
        let horizontal = thickness.left.try_add(&thickness.right)?;
        let vertical = thickness.top.try_add(&thickness.bottom)?;
        Ok(Rect::new(
            self.x.try_add(&thickness.left)?,
            self.y.try_add(&thickness.top)?,
            self.width.try_sub(&horizontal)?,
            self.height.try_sub(&vertical)?,
        ))
    }

    /// Grows the rectangle by the thickness on every side.
    pub fn outset(&self, thickness: &Thickness) -> Result<Rect, TypeError> {
        let horizontal = thickness.left.try_add(&thickness.right)?;
        let vertical = thickness.top.try_add(&thickness.bottom)?;
        Ok(Rect::new(
            self.x.try_sub(&thickness.left)?,
            self.y.try_sub(&thickness.top)?,
            self.width.try_add(&horizontal)?,
            self.height.try_add(&vertical)?,
        ))
    }

    /// The overlapping area, or [`Rect::empty`] when the rectangles are apart.
    /// Rectangles that only touch give a zero-sized result on the shared edge.
    pub fn intersect(&self, other: &Rect) -> Result<Rect, TypeError> {
        let left = self.x.try_max(&other.x)?;
        let right = self.right()?.try_min(&other.right()?)?;
        let top = self.y.try_max(&other.y)?;
        let bottom = self.bottom()?.try_min(&other.bottom()?)?;

        if right.try_cmp(&left)? != Ordering::Less && bottom.try_cmp(&top)? != Ordering::Less {
            Ok(Rect::new(left, top, right.try_sub(&left)?, bottom.try_sub(&top)?))
        } else {
            Ok(Rect::empty())
        }
    }

    pub fn union(&self, other: &Rect) -> Result<Rect, TypeError> {
        let left = self.x.try_min(&other.x)?;
        let right = self.right()?.try_max(&other.right()?)?;
        let top = self.y.try_min(&other.y)?;
        let bottom = self.bottom()?.try_max(&other.bottom()?)?;
        Ok(Rect::new(left, top, right.try_sub(&left)?, bottom.try_sub(&top)?))
    }

    /// Strict overlap test: rectangles sharing only an edge do not intersect.
    pub fn intersects_with(&self, other: &Rect) -> Result<bool, TypeError> {
        Ok(other.x.try_cmp(&self.right()?)? == Ordering::Less
            && self.x.try_cmp(&other.right()?)? == Ordering::Less
            && other.y.try_cmp(&self.bottom()?)? == Ordering::Less
            && self.y.try_cmp(&other.bottom()?)? == Ordering::Less)
    }

    /// Orders by location first, then by size.
    pub fn try_cmp(&self, other: &Rect) -> Result<Ordering, TypeError> {
        match self.location().try_cmp(&other.location())? {
            Ordering::Equal => self.size().try_cmp(&other.size()),
            other => Ok(other),
        }
    }
}

impl PartialOrd for Rect {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Per-side measurements, used for margins, padding and borders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thickness {
    pub top: Unit,
    pub right: Unit,
    pub bottom: Unit,
    pub left: Unit,
}

impl Thickness {
    pub fn new(top: Unit, right: Unit, bottom: Unit, left: Unit) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(all: Unit) -> Self {
        Self::new(all, all, all, all)
    }

    pub fn symmetric(vertical: Unit, horizontal: Unit) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn is_empty(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(Unit::is_zero)
    }

    pub fn try_add(&self, other: &Thickness) -> Result<Thickness, TypeError> {
        Ok(Thickness::new(
            self.top.try_add(&other.top)?,
            self.right.try_add(&other.right)?,
            self.bottom.try_add(&other.bottom)?,
            self.left.try_add(&other.left)?,
        ))
    }

    pub fn try_sub(&self, other: &Thickness) -> Result<Thickness, TypeError> {
        Ok(Thickness::new(
            self.top.try_sub(&other.top)?,
            self.right.try_sub(&other.right)?,
            self.bottom.try_sub(&other.bottom)?,
            self.left.try_sub(&other.left)?,
        ))
    }

    /// Orders by top, bottom, left, then right.
    pub fn try_cmp(&self, other: &Thickness) -> Result<Ordering, TypeError> {
        compare_all(&[
            (&self.top, &other.top),
            (&self.bottom, &other.bottom),
            (&self.left, &other.left),
            (&self.right, &other.right),
        ])
    }
}

impl PartialOrd for Thickness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {} {}]",
            self.top, self.right, self.bottom, self.left
        )
    }
}

impl FromStr for Thickness {
    type Err = TypeError;

    /// Accepts one, two or four units (`[10pt]`, `[4mm 2mm]`, `1 2 3 4`),
    /// brackets optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = run_parser(
            delimited(
                ws(opt(char('['))),
                separated_list1(space1, parse_unit),
                ws(opt(char(']'))),
            ),
            s,
            "thickness",
            "[all] | [vertical horizontal] | [top right bottom left]",
        )?;
        match parts.as_slice() {
            [all] => Ok(Thickness::uniform(*all)),
            [vertical, horizontal] => Ok(Thickness::symmetric(*vertical, *horizontal)),
            [top, right, bottom, left] => Ok(Thickness::new(*top, *right, *bottom, *left)),
            _ => Err(TypeError::format(
                "thickness",
                s,
                "one, two or four values",
            )),
        }
    }
}

impl Serialize for Thickness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Thickness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ThicknessDef {
            Str(String),
            Map {
                top: Unit,
                right: Unit,
                bottom: Unit,
                left: Unit,
            },
        }

        match ThicknessDef::deserialize(deserializer)? {
            ThicknessDef::Str(s) => s.parse().map_err(de::Error::custom),
            ThicknessDef::Map {
                top,
                right,
                bottom,
                left,
            } => Ok(Thickness::new(top, right, bottom, left)),
        }
    }
}
