/// Convenience result type used across Pixbleed.
pub type PixbleedResult<T> = Result<T, PixbleedError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixbleedError {
    /// Invalid effect parameters or sequence settings, detected at sequence start.
    #[error("config error: {0}")]
    Config(String),

    /// Strict pixel access outside the buffer.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Source image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Frame could not be encoded or streamed to an encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Frame sink misuse (ordering, lifecycle, size mismatch).
    #[error("sink error: {0}")]
    Sink(String),

    /// Errors when serializing or deserializing parameter presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixbleedError {
    /// Build a [`PixbleedError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PixbleedError::OutOfRange`] value.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Build a [`PixbleedError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PixbleedError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PixbleedError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`PixbleedError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
