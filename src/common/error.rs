// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum AirqError<E = ()>
where
    E: core::fmt::Debug, // Debug is enough for the Io message in no_std
{
    /// Underlying I/O error from the byte source (port gone, permission denied, busy).
    /// Retrying will not fix this one, unlike a missed frame.
    #[error("Byte source I/O error: {0:?}")]
    Io(E),

    /// Bytes handed to `Frame` do not start with the START sentinel.
    #[error("Frame does not start with 0xAA (got {0:#04x})")]
    InvalidFrameStart(u8),

    /// Bytes handed to `Frame` have the wrong length.
    #[error("Frame length mismatch: expected {expected}, got {got}")]
    FrameLength { expected: usize, got: usize },

    /// Fixed K coefficient must be finite and non-negative.
    #[error("Invalid K coefficient: {0}")]
    InvalidCoefficient(f64),
}

// Lets `?` lift a raw source error into the crate error.
impl<E: core::fmt::Debug> From<E> for AirqError<E> {
    fn from(e: E) -> Self {
        AirqError::Io(e)
    }
}

impl<E: core::fmt::Debug> AirqError<E> {
    /// True for faults that come from the byte source itself.
    pub fn is_source_fault(&self) -> bool {
        matches!(self, AirqError::Io(_))
    }
}
