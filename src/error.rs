//! Error types for loading scenes

use thiserror::Error;

/// Errors that can occur when loading or querying a scene snapshot.
///
/// Routing itself never fails; these only surface at the file boundary.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("duplicate shape id '{0}'")]
    DuplicateShape(String),

    #[error("shape '{id}' has invalid dimensions {width}x{height}")]
    InvalidShape { id: String, width: f64, height: f64 },

    #[error("unknown arrow '{0}'")]
    UnknownArrow(String),
}

impl SceneError {
    /// Create an invalid shape error
    pub fn invalid_shape(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self::InvalidShape {
            id: id.into(),
            width,
            height,
        }
    }
}
