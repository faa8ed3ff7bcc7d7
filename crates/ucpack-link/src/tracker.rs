use std::time::Duration;

use crate::camera::{CameraEvent, CameraLink, TrackingCommand};
use crate::clock::Clock;
use crate::drive::Drive;
use crate::error::Result;
use crate::radio::Radio;

/// How long each step waits for a camera order by default.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// What a tracker step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerStep {
    /// The robot is off; nothing was polled or driven.
    Off,
    /// Turned towards the target.
    Tracking(TrackingCommand),
    /// No order arrived in time; the robot was stopped.
    TargetLost,
    /// The camera re-paired; the robot was stopped.
    Reconnected,
}

/// Turns the robot to follow the face the camera reports.
pub struct Tracker<D, R, C> {
    drive: D,
    camera: CameraLink<R, C>,
    poll_timeout: Duration,
}

impl<D: Drive, R: Radio, C: Clock> Tracker<D, R, C> {
    pub fn new(drive: D, camera: CameraLink<R, C>) -> Self {
        Self {
            drive,
            camera,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Poll the camera once and drive accordingly.
    ///
    /// Only the horizontal rotation is applied, as the angular rate; the
    /// robot never moves forward. A failed poll stops the robot before the
    /// error is returned.
    pub fn step(&mut self) -> Result<TrackerStep> {
        if !self.drive.is_on() {
            return Ok(TrackerStep::Off);
        }

        let event = match self.camera.poll(self.poll_timeout) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "camera poll failed; stopping");
                if let Err(stop) = self.drive.drive(0.0, 0.0) {
                    tracing::warn!(error = %stop, "failed to stop drive");
                }
                return Err(err);
            }
        };

        match event {
            CameraEvent::Command(command) => {
                tracing::debug!(%command, "tracking");
                self.drive.drive(0.0, command.horizontal_rotation)?;
                Ok(TrackerStep::Tracking(command))
            }
            CameraEvent::ReconnectRequested => {
                self.drive.drive(0.0, 0.0)?;
                Ok(TrackerStep::Reconnected)
            }
            CameraEvent::Idle => {
                tracing::warn!("target lost");
                self.drive.drive(0.0, 0.0)?;
                Ok(TrackerStep::TargetLost)
            }
        }
    }

    pub fn drive(&self) -> &D {
        &self.drive
    }

    pub fn camera(&self) -> &CameraLink<R, C> {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraLink<R, C> {
        &mut self.camera
    }

    pub fn into_parts(self) -> (D, CameraLink<R, C>) {
        (self.drive, self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraConfig, MessageFormat};
    use crate::clock::ManualClock;
    use crate::error::LinkError;
    use crate::handshake::CAMERA_HELLO;
    use crate::testing::{RecordingDrive, ScriptedRadio, CAMERA_MAC};
    use ucpack_frame::{PacketCodec, DEFAULT_CAPACITY, TRACK};

    fn tracker(drive: RecordingDrive) -> Tracker<RecordingDrive, ScriptedRadio, ManualClock> {
        let clock = ManualClock::new();
        let radio = ScriptedRadio::new(clock.clone());
        let camera = CameraLink::new(
            radio,
            clock,
            CameraConfig {
                format: MessageFormat::Text,
                ..CameraConfig::default()
            },
        )
        .unwrap();
        Tracker::new(drive, camera)
    }

    #[test]
    fn drives_towards_target() {
        let mut tracker = tracker(RecordingDrive::default());
        tracker.camera_mut().radio_mut().queue(CAMERA_MAC, b"-12.5,3,0.5\0");

        let step = tracker.step().unwrap();
        assert!(matches!(step, TrackerStep::Tracking(c) if c.horizontal_rotation == -12.5));
        assert_eq!(tracker.drive().calls, vec![(0.0, -12.5)]);
    }

    #[test]
    fn stops_when_target_lost() {
        let mut tracker = tracker(RecordingDrive::default());
        tracker.camera_mut().radio_mut().queue(CAMERA_MAC, b"10,0,0\0");

        tracker.step().unwrap();
        assert_eq!(tracker.step().unwrap(), TrackerStep::TargetLost);
        assert_eq!(tracker.drive().calls, vec![(0.0, 10.0), (0.0, 0.0)]);
    }

    #[test]
    fn idle_when_robot_off() {
        let mut tracker = tracker(RecordingDrive {
            off: true,
            ..RecordingDrive::default()
        });
        tracker.camera_mut().radio_mut().queue(CAMERA_MAC, b"10,0,0\0");

        assert_eq!(tracker.step().unwrap(), TrackerStep::Off);
        assert!(tracker.drive().calls.is_empty());
        assert_eq!(tracker.camera().radio().inbox.len(), 1);
    }

    #[test]
    fn reconnect_stops_robot() {
        let mut tracker = tracker(RecordingDrive::default());
        let radio = tracker.camera_mut().radio_mut();
        radio.queue(CAMERA_MAC, CAMERA_HELLO);
        radio.queue(CAMERA_MAC, CAMERA_HELLO);

        assert_eq!(tracker.step().unwrap(), TrackerStep::Reconnected);
        assert_eq!(tracker.drive().calls, vec![(0.0, 0.0)]);
        assert_eq!(tracker.camera().peer(), Some(CAMERA_MAC));
    }

    #[test]
    fn poll_timeout_is_applied() {
        let clock = ManualClock::new();
        let radio = ScriptedRadio::new(clock.clone());
        let camera = CameraLink::new(radio, clock.clone(), CameraConfig::default()).unwrap();
        let mut tracker = Tracker::new(RecordingDrive::default(), camera)
            .with_poll_timeout(Duration::from_millis(200));

        tracker.step().unwrap();
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn bad_order_is_an_error() {
        let mut tracker = tracker(RecordingDrive::default());
        tracker.camera_mut().radio_mut().queue(CAMERA_MAC, b"left\0");

        assert!(matches!(tracker.step(), Err(LinkError::InvalidCommand(_))));
        assert_eq!(tracker.drive().calls, vec![(0.0, 0.0)]);
    }

    #[test]
    fn bad_order_after_tracking_stops_robot() {
        let mut tracker = tracker(RecordingDrive::default());
        let radio = tracker.camera_mut().radio_mut();
        radio.queue(CAMERA_MAC, b"7.5,0,0\0");
        radio.queue(CAMERA_MAC, b"7.5,oops\0");

        tracker.step().unwrap();
        assert!(tracker.step().is_err());
        assert_eq!(tracker.drive().calls, vec![(0.0, 7.5), (0.0, 0.0)]);
    }

    #[test]
    fn wrong_length_track_packet_stops_robot() {
        let clock = ManualClock::new();
        let radio = ScriptedRadio::new(clock.clone());
        let camera = CameraLink::new(radio, clock, CameraConfig::default()).unwrap();
        let mut tracker = Tracker::new(RecordingDrive::default(), camera);

        let mut codec = PacketCodec::new(DEFAULT_CAPACITY).unwrap();
        let frame = codec.pack_c1f(TRACK, 1.5).to_vec();
        tracker.camera_mut().radio_mut().queue(CAMERA_MAC, &frame);

        assert!(matches!(tracker.step(), Err(LinkError::Frame(_))));
        assert_eq!(tracker.drive().calls, vec![(0.0, 0.0)]);
    }
}
