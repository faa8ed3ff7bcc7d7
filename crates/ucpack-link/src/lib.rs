//! Camera link for a face-following robot.
//!
//! The robot pairs with a face-detection camera over a broadcast radio,
//! then turns towards whatever the camera reports. Hardware sits behind the
//! [`Radio`], [`Drive`] and [`Clock`] traits so the protocol logic runs and
//! tests anywhere.

pub mod camera;
pub mod clock;
pub mod drive;
pub mod error;
pub mod handshake;
pub mod radio;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use camera::{CameraConfig, CameraEvent, CameraLink, MessageFormat, TrackingCommand};
pub use clock::{Clock, ManualClock, SystemClock};
pub use drive::Drive;
pub use error::{LinkError, Result};
pub use handshake::{
    is_hello, Handshake, HandshakeConfig, HandshakeState, CAMERA_HELLO, ROBOT_HELLO,
};
pub use radio::{MacAddress, Radio};
pub use tracker::{Tracker, TrackerStep, DEFAULT_POLL_TIMEOUT};
