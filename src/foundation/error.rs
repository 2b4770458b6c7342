/// Convenience result type used across scanlens.
pub type ScanlensResult<T> = Result<T, ScanlensError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScanlensError {
    /// Invalid user-provided configuration or lens/scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or presenting pixel buffers.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors while mounting, ticking, or advancing the act sequence.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanlensError {
    /// Build a [`ScanlensError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScanlensError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`ScanlensError::Sequence`] value.
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Build a [`ScanlensError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
