//! Shading functions compiled from gradient color stops.
//!
//! A two-stop gradient becomes a single exponential interpolation. Longer
//! stop lists become a stitching function whose children each interpolate
//! between neighbouring stops over a `[0, 1]` domain.

use crate::error::DrawingError;
use folio_style::{GradientColorStop, GradientDescriptor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GradientFunction {
    /// Exponential interpolation from `color_zero` to `color_one`.
    #[serde(rename_all = "camelCase")]
    Two {
        color_zero: GradientColorStop,
        color_one: GradientColorStop,
        domain_start: f64,
        domain_end: f64,
        exponent: f64,
    },
    /// Stitches `children` together. `boundaries` has one entry fewer than
    /// `children` and `encodes` holds one `(t0, t1)` pair per child.
    #[serde(rename_all = "camelCase")]
    Three {
        children: Vec<GradientFunction>,
        boundaries: Vec<f64>,
        encodes: Vec<(f64, f64)>,
        domain_start: f64,
        domain_end: f64,
    },
}

impl GradientFunction {
    fn two(from: &GradientColorStop, to: &GradientColorStop) -> Self {
        GradientFunction::Two {
            color_zero: from.clone(),
            color_one: to.clone(),
            domain_start: 0.0,
            domain_end: 1.0,
            exponent: 1.0,
        }
    }

    /// Compiles normalized stops (every distance set, ascending).
    pub fn compile(stops: &[GradientColorStop]) -> Result<Self, DrawingError> {
        match stops {
            [] | [_] => Err(DrawingError::Gradient(format!(
                "A gradient needs at least two color stops, got {}",
                stops.len()
            ))),
            [from, to] => Ok(Self::two(from, to)),
            _ => {
                let children: Vec<GradientFunction> =
                    stops.windows(2).map(|pair| Self::two(&pair[0], &pair[1])).collect();
                let boundaries = stops[1..stops.len() - 1]
                    .iter()
                    .map(|stop| stop.distance.unwrap_or_default() / 100.0)
                    .collect();
                let encodes = vec![(0.0, 1.0); children.len()];
                Ok(GradientFunction::Three {
                    children,
                    boundaries,
                    encodes,
                    domain_start: 0.0,
                    domain_end: 1.0,
                })
            }
        }
    }

    /// Normalizes the descriptor's stops, expanding repeating gradients, and
    /// compiles them.
    pub fn from_descriptor(descriptor: &GradientDescriptor) -> Result<Self, DrawingError> {
        let stops = descriptor.resolved_stops();
        log::trace!("Compiling gradient with {} resolved stops", stops.len());
        Self::compile(&stops)
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            GradientFunction::Two {
                domain_start,
                domain_end,
                ..
            }
            | GradientFunction::Three {
                domain_start,
                domain_end,
                ..
            } => (*domain_start, *domain_end),
        }
    }

    /// Number of leaf interpolations.
    pub fn segment_count(&self) -> usize {
        match self {
            GradientFunction::Two { .. } => 1,
            GradientFunction::Three { children, .. } => children.iter().map(Self::segment_count).sum(),
        }
    }
}

impl TryFrom<&GradientDescriptor> for GradientFunction {
    type Error = DrawingError;

    fn try_from(descriptor: &GradientDescriptor) -> Result<Self, Self::Error> {
        Self::from_descriptor(descriptor)
    }
}
