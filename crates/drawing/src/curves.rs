//! Conversion of quadratic curves and elliptical arcs into cubic Beziers,
//! for output targets that only draw cubic curves.
//!
//! All coordinates here are plain points (`f64`).

use std::f64::consts::{FRAC_PI_2, PI};

/// One cubic segment, starting wherever the previous segment ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start_handle: (f64, f64),
    pub end_handle: (f64, f64),
    pub end: (f64, f64),
}

/// Elevates a quadratic curve to the equivalent cubic.
pub fn quadratic_to_cubic(start: (f64, f64), control: (f64, f64), end: (f64, f64)) -> CubicSegment {
    CubicSegment {
        start_handle: (
            start.0 + (control.0 - start.0) * 2.0 / 3.0,
            start.1 + (control.1 - start.1) * 2.0 / 3.0,
        ),
        end_handle: (
            end.0 + (control.0 - end.0) * 2.0 / 3.0,
            end.1 + (control.1 - end.1) * 2.0 / 3.0,
        ),
        end,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParameters {
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep_positive: bool,
}

/// Signed angle from vector `u` to vector `v`, in `[0, 2π)`.
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let ta = uy.atan2(ux);
    let tb = vy.atan2(vx);
    if tb >= ta {
        tb - ta
    } else {
        2.0 * PI - (ta - tb)
    }
}

/// Approximates an SVG endpoint-parameterised arc with cubic segments of at
/// most 90° each.
///
/// An arc that starts and ends at the same point draws nothing. A zero radius
/// degrades to a straight segment. Radii too small to span the endpoints are
/// scaled up uniformly, and negative radii are treated as positive.
pub fn arc_to_cubics(start: (f64, f64), arc: &ArcParameters, end: (f64, f64)) -> Vec<CubicSegment> {
    if start == end {
        return Vec::new();
    }
    let mut rx = arc.radius_x.abs();
    let mut ry = arc.radius_y.abs();
    if rx == 0.0 || ry == 0.0 {
        return vec![CubicSegment {
            start_handle: start,
            end_handle: end,
            end,
        }];
    }

    let (sin_phi, cos_phi) = arc.x_axis_rotation.to_radians().sin_cos();
    let half_dx = (start.0 - end.0) / 2.0;
    let half_dy = (start.1 - end.1) / 2.0;
    let x1 = cos_phi * half_dx + sin_phi * half_dy;
    let y1 = -sin_phi * half_dx + cos_phi * half_dy;

    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    let root = if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
        0.0
    } else {
        let sign = if arc.large_arc == arc.sweep_positive { -1.0 } else { 1.0 };
        let numerator = rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1;
        let denominator = rx * rx * y1 * y1 + ry * ry * x1 * x1;
        sign * (numerator / denominator).max(0.0).sqrt()
    };

    let cx1 = root * rx * y1 / ry;
    let cy1 = -root * ry * x1 / rx;
    let cx = cos_phi * cx1 - sin_phi * cy1 + (start.0 + end.0) / 2.0;
    let cy = sin_phi * cx1 + cos_phi * cy1 + (start.1 + end.1) / 2.0;

    let mut theta = vector_angle(1.0, 0.0, (x1 - cx1) / rx, (y1 - cy1) / ry);
    let mut sweep = vector_angle(
        (x1 - cx1) / rx,
        (y1 - cy1) / ry,
        (-x1 - cx1) / rx,
        (-y1 - cy1) / ry,
    );
    if !arc.sweep_positive && sweep > 0.0 {
        sweep -= 2.0 * PI;
    } else if arc.sweep_positive && sweep < 0.0 {
        sweep += 2.0 * PI;
    }

    let segments = (sweep.abs() / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
    let delta = sweep / segments as f64;
    let t = 8.0 / 3.0 * (delta / 4.0).sin().powi(2) / (delta / 2.0).sin();

    let mut result = Vec::with_capacity(segments);
    let mut from = start;
    for _ in 0..segments {
        let (sin1, cos1) = theta.sin_cos();
        let theta2 = theta + delta;
        let (sin2, cos2) = theta2.sin_cos();

        let to = (
            cos_phi * rx * cos2 - sin_phi * ry * sin2 + cx,
            sin_phi * rx * cos2 + cos_phi * ry * sin2 + cy,
        );
        let d1 = (
            t * (-cos_phi * rx * sin1 - sin_phi * ry * cos1),
            t * (-sin_phi * rx * sin1 + cos_phi * ry * cos1),
        );
        let de = (
            t * (cos_phi * rx * sin2 + sin_phi * ry * cos2),
            t * (sin_phi * rx * sin2 - cos_phi * ry * cos2),
        );

        result.push(CubicSegment {
            start_handle: (from.0 + d1.0, from.1 + d1.1),
            end_handle: (to.0 + de.0, to.1 + de.1),
            end: to,
        });
        theta = theta2;
        from = to;
    }
    result
}
