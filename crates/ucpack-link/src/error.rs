use std::time::Duration;

/// Errors that can occur on the camera link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] ucpack_frame::FrameError),

    /// The radio failed to send or receive.
    #[error("radio error: {0}")]
    Radio(String),

    /// The drive rejected a command.
    #[error("drive error: {0}")]
    Drive(String),

    /// No camera answered the hello broadcast in time.
    #[error("handshake timed out after {0:?}")]
    HandshakeTimedOut(Duration),

    /// A camera message could not be parsed as a tracking command.
    #[error("invalid tracking command: {0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, LinkError>;
