use std::fmt;
use std::io;

use ucpack_frame::FrameError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::new(DATA_INVALID, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    match err {
        FrameError::Io(source) => io_error(context, source),
        FrameError::Buffer(_) | FrameError::InvalidConfig(_) => {
            CliError::usage(format!("{context}: {err}"))
        }
        FrameError::PayloadTooLarge { .. }
        | FrameError::ShapeMismatch { .. }
        | FrameError::ValueCount { .. }
        | FrameError::ValueMismatch { .. }
        | FrameError::NoPayload => CliError::invalid_data(format!("{context}: {err}")),
        FrameError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_errors_map_to_exit_codes() {
        let err = frame_error("pack", FrameError::PayloadTooLarge { size: 300, max: 255 });
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("pack: payload too large"));

        let err = frame_error("config", FrameError::InvalidConfig("same markers".into()));
        assert_eq!(err.code, USAGE);

        let err = frame_error("read", FrameError::ConnectionClosed);
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn io_errors_map_to_exit_codes() {
        let err = io_error("open", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, FAILURE);

        let err = io_error("read", io::Error::from(io::ErrorKind::InvalidData));
        assert_eq!(err.code, DATA_INVALID);

        let err = io_error("read", io::Error::other("boom"));
        assert_eq!(err.code, INTERNAL);
    }
}
