//! Radio pairing between the robot and the camera.
//!
//! The robot broadcasts its hello string once per receive window until a
//! peer answers with the camera hello, or until the connection timeout runs
//! out. Time comes from an injected [`Clock`] so the deadline is testable.

use std::fmt;
use std::time::Duration;

use crate::clock::Clock;
use crate::error::{LinkError, Result};
use crate::radio::{MacAddress, Radio};

/// Hello broadcast by the robot.
pub const ROBOT_HELLO: &[u8] = b"ARDUINO_ALVIK_CAMERA_ROBOT_:D";

/// Hello answered by the camera. Peers may append a NUL terminator.
pub const CAMERA_HELLO: &[u8] = b"ARDUINO_ALVIK_CAMERA_FACEDETECTOR_:P";

/// Configuration for the pairing handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeConfig {
    /// Message broadcast while waiting for the camera.
    pub robot_hello: Vec<u8>,
    /// Message that identifies the camera.
    pub camera_hello: Vec<u8>,
    /// Give up once this much time has passed without an answer.
    pub timeout: Duration,
    /// How long to listen after each broadcast.
    pub receive_window: Duration,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            robot_hello: ROBOT_HELLO.to_vec(),
            camera_hello: CAMERA_HELLO.to_vec(),
            timeout: Duration::from_secs(120),
            receive_window: Duration::from_secs(1),
        }
    }
}

/// Compare a received message against a hello, ignoring trailing NULs.
pub fn is_hello(message: &[u8], hello: &[u8]) -> bool {
    trim_nul(message) == trim_nul(hello)
}

fn trim_nul(message: &[u8]) -> &[u8] {
    let end = message
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    &message[..end]
}

/// Where the handshake currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Idle,
    Broadcasting { since: Duration, attempts: u32 },
    Connected { peer: MacAddress },
    TimedOut,
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandshakeState::Idle => f.write_str("idle"),
            HandshakeState::Broadcasting { attempts, .. } => {
                write!(f, "broadcasting (attempt {attempts})")
            }
            HandshakeState::Connected { peer } => write!(f, "connected to {peer}"),
            HandshakeState::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Pairing state machine.
#[derive(Debug, Clone)]
pub struct Handshake {
    config: HandshakeConfig,
    state: HandshakeState,
}

impl Handshake {
    pub fn new(config: HandshakeConfig) -> Self {
        Self {
            config,
            state: HandshakeState::Idle,
        }
    }

    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// The paired camera, once connected.
    pub fn peer(&self) -> Option<MacAddress> {
        match self.state {
            HandshakeState::Connected { peer } => Some(peer),
            _ => None,
        }
    }

    /// Advance the handshake by one transition.
    ///
    /// From `Idle` this starts broadcasting. While broadcasting, each step
    /// either times out or sends one hello and listens for one receive
    /// window. `Connected` and `TimedOut` are terminal until [`reset`](Self::reset).
    pub fn step<R, C>(&mut self, radio: &mut R, clock: &C) -> Result<HandshakeState>
    where
        R: Radio + ?Sized,
        C: Clock + ?Sized,
    {
        self.state = match self.state {
            HandshakeState::Idle => {
                tracing::info!("broadcasting hello to camera");
                HandshakeState::Broadcasting {
                    since: clock.now(),
                    attempts: 0,
                }
            }
            HandshakeState::Broadcasting { since, attempts } => {
                let elapsed = clock.now().saturating_sub(since);
                if elapsed > self.config.timeout {
                    tracing::warn!(?elapsed, attempts, "camera handshake timed out");
                    HandshakeState::TimedOut
                } else {
                    self.attempt(radio, since, attempts + 1)?
                }
            }
            terminal => terminal,
        };
        Ok(self.state)
    }

    fn attempt<R>(&self, radio: &mut R, since: Duration, attempts: u32) -> Result<HandshakeState>
    where
        R: Radio + ?Sized,
    {
        tracing::debug!(attempts, "sending robot hello");
        radio.broadcast(&self.config.robot_hello)?;

        match radio.recv(self.config.receive_window)? {
            Some((peer, message)) if is_hello(&message, &self.config.camera_hello) => {
                tracing::info!(%peer, attempts, "camera connected");
                Ok(HandshakeState::Connected { peer })
            }
            Some((peer, message)) => {
                tracing::debug!(%peer, len = message.len(), "ignoring message during handshake");
                Ok(HandshakeState::Broadcasting { since, attempts })
            }
            None => Ok(HandshakeState::Broadcasting { since, attempts }),
        }
    }

    /// Run the handshake from the start until it connects or times out.
    pub fn run<R, C>(&mut self, radio: &mut R, clock: &C) -> Result<MacAddress>
    where
        R: Radio + ?Sized,
        C: Clock + ?Sized,
    {
        self.reset();
        loop {
            match self.step(radio, clock)? {
                HandshakeState::Connected { peer } => return Ok(peer),
                HandshakeState::TimedOut => {
                    return Err(LinkError::HandshakeTimedOut(self.config.timeout))
                }
                HandshakeState::Idle | HandshakeState::Broadcasting { .. } => {}
            }
        }
    }

    /// Return to `Idle`, forgetting any paired peer.
    pub fn reset(&mut self) {
        self.state = HandshakeState::Idle;
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new(HandshakeConfig::default())
    }
}
