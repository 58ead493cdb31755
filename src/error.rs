use folio_drawing::DrawingError;
use folio_layout::LayoutError;
use folio_style::StyleParseError;
use folio_types::TypeError;
use thiserror::Error;

/// Errors from any folio component.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Invalid value: {0}")]
    Type(#[from] TypeError),

    #[error("Style parsing failed: {0}")]
    Style(#[from] StyleParseError),

    #[error("Drawing failed: {0}")]
    Drawing(#[from] DrawingError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
