//! folio: the geometry and text support beneath PDF document generation.
//!
//! - [`types`]: measurement units, points, rectangles, transforms, colors
//! - [`style`]: CSS gradient parsing and color stop normalization
//! - [`drawing`]: vector paths, SVG path data and gradient shading functions
//! - [`layout`]: line breaking and hyphenation

mod config;
mod error;

pub use folio_drawing as drawing;
pub use folio_layout as layout;
pub use folio_style as style;
pub use folio_types as types;

pub use config::FolioConfig;
pub use error::FolioError;

pub use folio_drawing::{GradientFunction, GraphicsPath, PathOperation, PathParseOptions};
pub use folio_layout::{HyphenationOpportunity, HyphenationStrategy, Hyphenator, LayoutConfig};
pub use folio_style::GradientDescriptor;
pub use folio_types::{Point, Rect, Size, Thickness, TransformationMatrix, Unit, UnitKind};
