//! Receiving tracking orders from the face-detection camera.

use std::fmt;
use std::time::Duration;

use ucpack_frame::{command, FrameConfig, PacketCodec};

use crate::clock::Clock;
use crate::error::{LinkError, Result};
use crate::handshake::{is_hello, Handshake, HandshakeConfig};
use crate::radio::{MacAddress, Radio};

/// Movement order computed by the camera for the face it follows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingCommand {
    /// Rotation around the vertical axis, degrees per second.
    pub horizontal_rotation: f32,
    /// Tilt rotation, degrees per second.
    pub vertical_rotation: f32,
    /// Forward speed.
    pub displacement_speed: f32,
}

impl TrackingCommand {
    /// Parse the legacy text form: `"h,v,s"`, optionally NUL-terminated.
    /// Fields past the third are ignored.
    pub fn from_text(message: &[u8]) -> Result<Self> {
        let end = message
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(message.len());
        let text = std::str::from_utf8(&message[..end])
            .map_err(|err| LinkError::InvalidCommand(format!("not UTF-8: {err}")))?;

        let mut fields = text.split(',').map(str::trim);
        let mut next = |name: &str| -> Result<f32> {
            let raw = fields
                .next()
                .ok_or_else(|| LinkError::InvalidCommand(format!("missing {name} in '{text}'")))?;
            raw.parse::<f32>()
                .map_err(|err| LinkError::InvalidCommand(format!("bad {name} '{raw}': {err}")))
        };

        Ok(Self {
            horizontal_rotation: next("horizontal rotation")?,
            vertical_rotation: next("vertical rotation")?,
            displacement_speed: next("displacement speed")?,
        })
    }
}

impl fmt::Display for TrackingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.horizontal_rotation, self.vertical_rotation, self.displacement_speed
        )
    }
}

/// How tracking orders are encoded on the radio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageFormat {
    /// Framed packets; orders are `TRACK` commands carrying three floats.
    #[default]
    Packet,
    /// NUL-terminated `"h,v,s"` text, as sent by older camera firmware.
    Text,
}

/// Result of one camera poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    Command(TrackingCommand),
    /// The camera restarted and asked to pair again; the handshake has rerun.
    ReconnectRequested,
    /// Nothing usable arrived within the timeout.
    Idle,
}

/// Configuration for [`CameraLink`].
#[derive(Debug, Clone, Default)]
pub struct CameraConfig {
    pub handshake: HandshakeConfig,
    pub format: MessageFormat,
    /// Framing used in [`MessageFormat::Packet`] mode.
    pub frame: FrameConfig,
}

/// Radio link to the camera: pairing plus decoding of tracking orders.
pub struct CameraLink<R, C> {
    radio: R,
    clock: C,
    handshake: Handshake,
    codec: PacketCodec,
    format: MessageFormat,
}

impl<R: Radio, C: Clock> CameraLink<R, C> {
    pub fn new(radio: R, clock: C, config: CameraConfig) -> Result<Self> {
        Ok(Self {
            radio,
            clock,
            handshake: Handshake::new(config.handshake),
            codec: PacketCodec::with_config(config.frame)?,
            format: config.format,
        })
    }

    /// Pair with the camera, blocking until it answers or the handshake
    /// times out.
    pub fn connect(&mut self) -> Result<MacAddress> {
        self.codec.reset();
        self.handshake.run(&mut self.radio, &self.clock)
    }

    /// Wait up to `timeout` for the next tracking order.
    ///
    /// In packet mode, orders already buffered from an earlier datagram are
    /// returned before the radio is polled again.
    pub fn poll(&mut self, timeout: Duration) -> Result<CameraEvent> {
        if self.format == MessageFormat::Packet {
            if let Some(command) = self.next_tracking()? {
                return Ok(CameraEvent::Command(command));
            }
        }

        let Some((peer, message)) = self.radio.recv(timeout)? else {
            return Ok(CameraEvent::Idle);
        };

        if is_hello(&message, &self.handshake.config().camera_hello) {
            tracing::info!(%peer, "camera requested reconnect");
            self.connect()?;
            return Ok(CameraEvent::ReconnectRequested);
        }

        match self.format {
            MessageFormat::Text => {
                let command = TrackingCommand::from_text(&message)?;
                tracing::trace!(%peer, %command, "tracking order");
                Ok(CameraEvent::Command(command))
            }
            MessageFormat::Packet => {
                self.codec.feed(&message);
                Ok(self
                    .next_tracking()?
                    .map_or(CameraEvent::Idle, CameraEvent::Command))
            }
        }
    }

    fn next_tracking(&mut self) -> Result<Option<TrackingCommand>> {
        loop {
            let status = self.codec.extract();
            if status.advanced() {
                continue;
            }
            if !status.is_ready() {
                return Ok(None);
            }

            match self.codec.payload_code() {
                Some(command::TRACK) => {
                    let (_, h, v, s) = self.codec.unpack_c3f()?;
                    return Ok(Some(TrackingCommand {
                        horizontal_rotation: h,
                        vertical_rotation: v,
                        displacement_speed: s,
                    }));
                }
                Some(command::TARGET_LOST) => {
                    tracing::debug!("camera reported target lost");
                    return Ok(None);
                }
                code => {
                    tracing::debug!(?code, "ignoring packet");
                }
            }
        }
    }

    /// The paired camera, if connected.
    pub fn peer(&self) -> Option<MacAddress> {
        self.handshake.peer()
    }

    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    pub fn format(&self) -> MessageFormat {
        self.format
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}

impl<R, C> fmt::Debug for CameraLink<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraLink")
            .field("handshake", &self.handshake.state())
            .field("format", &self.format)
            .field("buffered", &self.codec.buffered())
            .finish()
    }
}
