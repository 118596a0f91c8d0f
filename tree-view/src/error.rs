//! Renderer error types.

use std::fmt;
use std::io;

/// Errors that can occur while rasterizing or exporting frames.
#[derive(Debug)]
pub enum RenderError {
    /// I/O error (file operations)
    Io(io::Error),
    /// Drawing backend failure
    Drawing(String),
    /// GIF encoding error
    GifEncoding(String),
    /// Canvas dimensions the GIF format cannot hold
    InvalidCanvas { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "I/O error: {}", e),
            RenderError::Drawing(msg) => write!(f, "Drawing error: {}", msg),
            RenderError::GifEncoding(msg) => write!(f, "GIF encoding error: {}", msg),
            RenderError::InvalidCanvas { width, height } => {
                write!(f, "Invalid canvas size: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<gif::EncodingError> for RenderError {
    fn from(err: gif::EncodingError) -> Self {
        RenderError::GifEncoding(err.to_string())
    }
}

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
