//! Error types for scene construction.

use std::fmt;

/// Errors that can occur while resolving a style or building a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A color string is neither `#rgb`/`#rrggbb`/`#rrggbbaa` nor a known name.
    InvalidColor(String),
    /// A palette list that must hold at least one color is empty.
    EmptyPalette(&'static str),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidColor(spec) => write!(f, "Invalid color: {:?}", spec),
            SceneError::EmptyPalette(which) => write!(f, "Palette list is empty: {}", which),
        }
    }
}

impl std::error::Error for SceneError {}

/// Result type alias for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
