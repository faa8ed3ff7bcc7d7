/// Errors that can occur when constructing a ring buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A ring buffer must hold at least one byte.
    #[error("ring buffer capacity must be greater than zero")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, BufferError>;
