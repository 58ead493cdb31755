//! Gradient descriptors as written in styles, and the stop normalization
//! applied before they are compiled into shading functions.

use crate::parsers::{StyleParseError, parse_gradient};
use folio_types::{Color, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default direction for linear gradients: top to bottom.
pub const DEFAULT_LINEAR_ANGLE: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientColorStop {
    pub color: Color,
    /// Position along the gradient axis, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl GradientColorStop {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            distance: None,
            opacity: None,
        }
    }

    pub fn at(color: Color, distance: f64) -> Self {
        Self {
            color,
            distance: Some(distance),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadialShape {
    Circle,
    #[default]
    Ellipse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadialSize {
    ClosestSide,
    ClosestCorner,
    FarthestSide,
    #[default]
    FarthestCorner,
}

impl RadialShape {
    pub fn keyword(self) -> &'static str {
        match self {
            RadialShape::Circle => "circle",
            RadialShape::Ellipse => "ellipse",
        }
    }
}

impl RadialSize {
    pub fn keyword(self) -> &'static str {
        match self {
            RadialSize::ClosestSide => "closest-side",
            RadialSize::ClosestCorner => "closest-corner",
            RadialSize::FarthestSide => "farthest-side",
            RadialSize::FarthestCorner => "farthest-corner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GradientDescriptor {
    #[serde(rename_all = "camelCase")]
    Linear {
        angle_deg: f64,
        repeating: bool,
        stops: Vec<GradientColorStop>,
    },
    #[serde(rename_all = "camelCase")]
    Radial {
        shape: RadialShape,
        size_mode: RadialSize,
        repeating: bool,
        stops: Vec<GradientColorStop>,
        center: Option<Point>,
    },
}

impl GradientDescriptor {
    pub fn linear(angle_deg: f64, stops: Vec<GradientColorStop>) -> Self {
        GradientDescriptor::Linear {
            angle_deg,
            repeating: false,
            stops,
        }
    }

    pub fn radial(shape: RadialShape, stops: Vec<GradientColorStop>) -> Self {
        GradientDescriptor::Radial {
            shape,
            size_mode: RadialSize::default(),
            repeating: false,
            stops,
            center: None,
        }
    }

    pub fn stops(&self) -> &[GradientColorStop] {
        match self {
            GradientDescriptor::Linear { stops, .. } | GradientDescriptor::Radial { stops, .. } => {
                stops
            }
        }
    }

    pub fn is_repeating(&self) -> bool {
        match self {
            GradientDescriptor::Linear { repeating, .. }
            | GradientDescriptor::Radial { repeating, .. } => *repeating,
        }
    }

    /// The stops ready for compilation: normalized, and for repeating
    /// gradients tiled out to the full 0..100 range.
    pub fn resolved_stops(&self) -> Vec<GradientColorStop> {
        let stops = normalize_stops(self.stops());
        if self.is_repeating() {
            expand_repeating(&stops)
        } else {
            stops
        }
    }

    pub fn parse(input: &str) -> Result<Self, StyleParseError> {
        parse_gradient(input)
    }

    /// Parses a CSS gradient, returning `None` for anything unrecognised.
    pub fn try_parse(input: &str) -> Option<Self> {
        match parse_gradient(input) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                log::debug!("Ignoring gradient '{}': {}", input, e);
                None
            }
        }
    }
}

impl FromStr for GradientDescriptor {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_gradient(s)
    }
}

/// Fills in missing stop distances so every stop has a position.
///
/// - a first stop placed after 0 gets a copy of its color inserted at 0
/// - a first stop without a distance sits at 0, a last one at 100
/// - stops without a distance are spread evenly between their neighbours
///
/// The result is ordered by distance. Lists with fewer than two stops only
/// have their single stop anchored at 0.
pub fn normalize_stops(stops: &[GradientColorStop]) -> Vec<GradientColorStop> {
    let mut result: Vec<GradientColorStop> = stops.to_vec();
    if result.len() < 2 {
        if let Some(only) = result.first_mut() {
            only.distance.get_or_insert(0.0);
        }
        return result;
    }

    if let Some(first) = result[0].distance.filter(|d| *d > 0.0) {
        log::debug!("Inserting leading gradient stop at 0 (first stop at {})", first);
        let color = result[0].color;
        result.insert(0, GradientColorStop::at(color, 0.0));
    }
    result[0].distance.get_or_insert(0.0);
    if let Some(last) = result.last_mut() {
        last.distance.get_or_insert(100.0);
    }

    let mut previous = 0;
    for i in 1..result.len() {
        let Some(max) = result[i].distance else {
            continue;
        };
        let gaps = i - previous;
        if gaps > 1 {
            let min = result[previous].distance.unwrap_or(0.0);
            let step = (max - min) / gaps as f64;
            for (offset, stop) in result[previous + 1..i].iter_mut().enumerate() {
                stop.distance = Some(min + step * (offset + 1) as f64);
            }
        }
        previous = i;
    }

    result.sort_by(|a, b| {
        a.distance
            .unwrap_or(0.0)
            .total_cmp(&b.distance.unwrap_or(0.0))
    });
    result
}

/// Shortest pattern, in percent, that [`expand_repeating`] will tile.
pub const MIN_REPEAT_PERIOD: f64 = 1e-3;

/// Upper bound on the stops a repeating gradient may expand to.
pub const MAX_REPEATED_STOPS: usize = 4096;

/// Tiles a normalized stop pattern until it reaches 100.
///
/// The pattern runs from the first stop to the last; each repeat restarts
/// with a hard edge back to the first color. A stop that would land past 100
/// is clamped to 100. Patterns that already reach 100, that are shorter
/// than [`MIN_REPEAT_PERIOD`], or that carry a non-finite distance come back
/// unchanged, as do patterns that would need more than
/// [`MAX_REPEATED_STOPS`] stops.
pub fn expand_repeating(stops: &[GradientColorStop]) -> Vec<GradientColorStop> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return stops.to_vec();
    };
    if stops.iter().any(|s| s.distance.is_some_and(|d| !d.is_finite())) {
        log::warn!("Not repeating gradient stops with a non-finite distance");
        return stops.to_vec();
    }
    let start = first.distance.unwrap_or(0.0);
    let period = last.distance.unwrap_or(100.0) - start;
    if period <= 0.0 || start + period >= 100.0 {
        return stops.to_vec();
    }
    let tiles = ((100.0 - start) / period).ceil();
    if period < MIN_REPEAT_PERIOD || tiles * stops.len() as f64 > MAX_REPEATED_STOPS as f64 {
        log::warn!(
            "Repeating gradient period {} is too short to expand; using the pattern once",
            period
        );
        return stops.to_vec();
    }

    let mut result = stops.to_vec();
    let mut shift = period;
    'tiles: loop {
        for stop in stops {
            let distance = stop.distance.unwrap_or(0.0) + shift;
            let mut next = stop.clone();
            next.distance = Some(distance.min(100.0));
            result.push(next);
            if distance >= 100.0 {
                break 'tiles;
            }
        }
        shift += period;
    }
    log::debug!(
        "Expanded repeating gradient from {} to {} stops",
        stops.len(),
        result.len()
    );
    result
}

fn write_stop(f: &mut fmt::Formatter<'_>, stop: &GradientColorStop) -> fmt::Result {
    match (stop.color, stop.opacity) {
        (Color::Rgb { r, g, b }, Some(a)) => write!(f, "rgba({},{},{},{})", r, g, b, a)?,
        (color, _) => write!(f, "{}", color)?,
    }
    if let Some(distance) = stop.distance {
        write!(f, " {}%", distance)?;
    }
    Ok(())
}

impl fmt::Display for GradientDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_repeating() {
            write!(f, "repeating-")?;
        }
        match self {
            GradientDescriptor::Linear { angle_deg, .. } => {
                write!(f, "linear-gradient({}deg", angle_deg)?;
            }
            GradientDescriptor::Radial {
                shape,
                size_mode,
                center,
                ..
            } => {
                write!(f, "radial-gradient({} {}", shape.keyword(), size_mode.keyword())?;
                if let Some(center) = center {
                    write!(f, " at {} {}", center.x, center.y)?;
                }
            }
        }
        for stop in self.stops() {
            write!(f, ", ")?;
            write_stop(f, stop)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(255, 0, 0)
    }

    fn green() -> Color {
        Color::rgb(0, 128, 0)
    }

    fn blue() -> Color {
        Color::rgb(0, 0, 255)
    }

    fn distances(stops: &[GradientColorStop]) -> Vec<f64> {
        stops.iter().map(|s| s.distance.unwrap_or(f64::NAN)).collect()
    }

    #[test]
    fn test_two_unplaced_stops_span_full_range() {
        let stops = normalize_stops(&[GradientColorStop::new(red()), GradientColorStop::new(green())]);
        assert_eq!(distances(&stops), vec![0.0, 100.0]);
    }

    #[test]
    fn test_offset_first_stop_gets_leading_copy() {
        let stops = normalize_stops(&[
            GradientColorStop::at(red(), 50.0).with_opacity(0.5),
            GradientColorStop::at(green(), 100.0),
        ]);
        assert_eq!(stops.len(), 3);
        assert_eq!(distances(&stops), vec![0.0, 50.0, 100.0]);
        assert_eq!(stops[0].color, red());
        assert_eq!(stops[0].opacity, None);
        assert_eq!(stops[1].opacity, Some(0.5));
    }

    #[test]
    fn test_unplaced_stops_are_spread_evenly() {
        let stops = normalize_stops(&[
            GradientColorStop::new(red()),
            GradientColorStop::new(green()),
            GradientColorStop::new(blue()),
        ]);
        assert_eq!(distances(&stops), vec![0.0, 50.0, 100.0]);

        let stops = normalize_stops(&[
            GradientColorStop::new(red()),
            GradientColorStop::at(green(), 20.0),
            GradientColorStop::new(blue()),
            GradientColorStop::new(red()),
            GradientColorStop::at(green(), 80.0),
        ]);
        assert_eq!(distances(&stops), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_stops_are_sorted() {
        let stops = normalize_stops(&[
            GradientColorStop::at(red(), 0.0),
            GradientColorStop::at(blue(), 70.0),
            GradientColorStop::at(green(), 30.0),
        ]);
        assert_eq!(distances(&stops), vec![0.0, 30.0, 70.0]);
        assert_eq!(stops[1].color, green());
    }

    #[test]
    fn test_single_stop_is_anchored() {
        let stops = normalize_stops(&[GradientColorStop::new(red())]);
        assert_eq!(distances(&stops), vec![0.0]);
        assert!(normalize_stops(&[]).is_empty());
    }

    #[test]
    fn test_expand_repeating_tiles_pattern() {
        let stops = normalize_stops(&[
            GradientColorStop::at(red(), 0.0),
            GradientColorStop::at(blue(), 40.0),
        ]);
        let expanded = expand_repeating(&stops);
        assert_eq!(
            distances(&expanded),
            vec![0.0, 40.0, 40.0, 80.0, 80.0, 100.0]
        );
        assert_eq!(expanded[2].color, red());
        assert_eq!(expanded[5].color, blue());
    }

    #[test]
    fn test_expand_repeating_tiny_period_is_not_tiled() {
        let stops = normalize_stops(&[
            GradientColorStop::at(red(), 0.0),
            GradientColorStop::at(blue(), 0.0001),
        ]);
        assert_eq!(expand_repeating(&stops), stops);

        let stops = normalize_stops(&[
            GradientColorStop::at(red(), 0.0),
            GradientColorStop::at(blue(), 0.01),
        ]);
        assert_eq!(expand_repeating(&stops), stops);

        let descriptor = GradientDescriptor::parse("repeating-linear-gradient(red 0%, blue 0.0001%)").unwrap();
        assert!(descriptor.resolved_stops().len() <= MAX_REPEATED_STOPS);
    }

    #[test]
    fn test_expand_repeating_ignores_non_finite_distances() {
        let stops = vec![
            GradientColorStop::at(red(), 0.0),
            GradientColorStop::at(blue(), f64::NAN),
            GradientColorStop::at(blue(), 10.0),
        ];
        assert_eq!(expand_repeating(&stops).len(), 3);
    }

    #[test]
    fn test_expand_repeating_full_pattern_is_unchanged() {
        let stops = normalize_stops(&[GradientColorStop::new(red()), GradientColorStop::new(blue())]);
        assert_eq!(expand_repeating(&stops), stops);
    }

    #[test]
    fn test_resolved_stops_honours_repeating_flag() {
        let mut descriptor = GradientDescriptor::linear(
            90.0,
            vec![GradientColorStop::at(red(), 0.0), GradientColorStop::at(blue(), 50.0)],
        );
        assert_eq!(descriptor.resolved_stops().len(), 2);
        if let GradientDescriptor::Linear { repeating, .. } = &mut descriptor {
            *repeating = true;
        }
        assert_eq!(descriptor.resolved_stops().len(), 4);
    }
}
