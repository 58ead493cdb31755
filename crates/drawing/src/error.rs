use folio_types::TypeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawingError {
    #[error("Invalid path data at offset {position}: {message}")]
    PathData { position: usize, message: String },
    #[error("Gradient error: {0}")]
    Gradient(String),
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl DrawingError {
    pub(crate) fn path_data(position: usize, message: impl Into<String>) -> Self {
        DrawingError::PathData {
            position,
            message: message.into(),
        }
    }
}
