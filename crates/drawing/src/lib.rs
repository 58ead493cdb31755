//! Vector drawing primitives for folio.
//!
//! This crate provides:
//! - `GraphicsPath` for building paths from absolute and relative drawing calls
//! - An SVG path data reader producing `GraphicsPath`s
//! - Conversion of arcs and quadratic curves into cubic Beziers
//! - `GradientFunction`, the shading function compiled from gradient stops

pub mod curves;
mod error;
pub mod function;
pub mod path;
pub mod svg;

pub use error::DrawingError;
pub use function::GradientFunction;
pub use path::{FillMode, GraphicsPath, PathOperation, Subpath, SubpathState};
pub use svg::{PathParseOptions, append_path_data, parse_path_data, parse_path_data_with};
