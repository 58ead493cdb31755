//! Value types shared across folio: measurement units, geometry, transforms,
//! colors and dash patterns.

pub mod color;
pub mod dash;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod parse;
pub mod unit;

pub use color::{Color, ColorSpace};
pub use dash::Dash;
pub use error::TypeError;
pub use geometry::{Point, Rect, Size, Thickness};
pub use matrix::TransformationMatrix;
pub use unit::{Unit, UnitKind};
