//! Built-in command codes.
//!
//! Codes 0x00-0x1F are reserved for built-in use.
//! Codes 0x20-0xFF are available for application-defined commands.

use crate::shape::{self, Shape};

/// Tracking order from the camera: horizontal rotation (deg/s), vertical
/// rotation (deg/s) and displacement speed, sent as `C3F`.
pub const TRACK: u8 = 0x10;

/// The camera lost the face it was following. Sent as `C1B` with a reason byte.
pub const TARGET_LOST: u8 = 0x11;

/// First user-defined command code.
pub const USER_COMMAND_START: u8 = 0x20;

/// Returns a human-readable name for a command code.
pub fn command_name(code: u8) -> &'static str {
    match code {
        TRACK => "TRACK",
        TARGET_LOST => "TARGET_LOST",
        0x00..=0x1F => "RESERVED",
        _ => "USER",
    }
}

/// Shape carried by a built-in command, if the code is one.
pub fn command_shape(code: u8) -> Option<&'static Shape> {
    match code {
        TRACK => Some(&shape::C3F),
        TARGET_LOST => Some(&shape::C1B),
        _ => None,
    }
}

/// Returns true if the command code is in the reserved range.
pub fn is_reserved(code: u8) -> bool {
    code < USER_COMMAND_START
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(command_name(TRACK), "TRACK");
        assert_eq!(command_name(TARGET_LOST), "TARGET_LOST");
        assert_eq!(command_name(0x05), "RESERVED");
        assert_eq!(command_name(USER_COMMAND_START), "USER");
    }

    #[test]
    fn builtin_shapes() {
        assert_eq!(command_shape(TRACK), Some(&shape::C3F));
        assert_eq!(command_shape(TARGET_LOST), Some(&shape::C1B));
        assert_eq!(command_shape(0x42), None);
    }

    #[test]
    fn reserved_range() {
        assert!(is_reserved(0));
        assert!(is_reserved(TRACK));
        assert!(!is_reserved(USER_COMMAND_START));
    }
}
