use crate::field::FieldKind;

/// Errors that can occur during packet encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The ingest ring buffer could not be created.
    #[error("ring buffer error: {0}")]
    Buffer(#[from] ucpack_buffer::BufferError),

    /// The code + data region does not fit in the one-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The decoded payload length does not match the requested shape.
    #[error("payload does not match shape {shape} ({actual} bytes, expected {expected})")]
    ShapeMismatch {
        shape: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The number of values supplied does not match the shape.
    #[error("shape {shape} takes {expected} values, got {actual}")]
    ValueCount {
        shape: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A supplied value has the wrong field type for its position.
    #[error("value {index} of shape {shape} must be {expected}, got {found}")]
    ValueMismatch {
        shape: &'static str,
        index: usize,
        expected: FieldKind,
        found: FieldKind,
    },

    /// No payload has been decoded yet.
    #[error("no decoded payload available")]
    NoPayload,

    /// The configuration cannot frame packets.
    #[error("invalid frame configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred while reading or writing packets.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before another complete packet was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
