/// Convenience result type used across the drawing engine.
pub type DrawingResult<T> = Result<T, DrawingError>;

/// Top-level error taxonomy used by pixel buffer and compositing APIs.
///
/// Every variant is a programming error on the caller's side or a collaborator failure; nothing in
/// this crate retries.
#[derive(thiserror::Error, Debug)]
pub enum DrawingError {
    /// Non-positive width/height passed to an image or geometry constructor.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Null, misaligned, or undersized backing storage.
    #[error("invalid buffer: {0}")]
    InvalidBuffer(String),

    /// The image was disposed before this access.
    #[error("image has been disposed")]
    Disposed,

    /// A row, pixel or region index outside the image.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Invalid operation parameter (kernel size, border width, thread count...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A parallel partition panicked; the target buffer must be treated as corrupted.
    #[error("parallel partition failed: {0}")]
    Partition(String),

    /// Wrapped lower-level error from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrawingError {
    /// Build a [`DrawingError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`DrawingError::InvalidBuffer`] value.
    pub fn invalid_buffer(msg: impl Into<String>) -> Self {
        Self::InvalidBuffer(msg.into())
    }

    /// Build a [`DrawingError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`DrawingError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrawingError::Partition`] value.
    pub fn partition(msg: impl Into<String>) -> Self {
        Self::Partition(msg.into())
    }

    /// Return `true` for [`DrawingError::Disposed`].
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Disposed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
