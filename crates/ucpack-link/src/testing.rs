//! Scripted radio and recording drive for unit tests.

use std::collections::VecDeque;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::drive::Drive;
use crate::error::{LinkError, Result};
use crate::radio::{MacAddress, Radio};

pub const CAMERA_MAC: MacAddress = MacAddress([0x24, 0x0A, 0xC4, 0x11, 0x22, 0x33]);

/// Replays queued datagrams. An empty queue (or a queued `None`) behaves as
/// a silent receive window and advances the shared clock by the timeout.
pub struct ScriptedRadio {
    pub clock: ManualClock,
    pub inbox: VecDeque<Option<(MacAddress, Vec<u8>)>>,
    pub sent: Vec<Vec<u8>>,
    pub fail: bool,
}

impl ScriptedRadio {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            inbox: VecDeque::new(),
            sent: Vec::new(),
            fail: false,
        }
    }

    pub fn queue(&mut self, from: MacAddress, message: &[u8]) {
        self.inbox.push_back(Some((from, message.to_vec())));
    }

    pub fn queue_silence(&mut self) {
        self.inbox.push_back(None);
    }
}

impl Radio for ScriptedRadio {
    fn broadcast(&mut self, message: &[u8]) -> Result<()> {
        if self.fail {
            return Err(LinkError::Radio("send failed".to_string()));
        }
        self.sent.push(message.to_vec());
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> Result<Option<(MacAddress, Vec<u8>)>> {
        if self.fail {
            return Err(LinkError::Radio("receive failed".to_string()));
        }
        match self.inbox.pop_front().flatten() {
            Some(datagram) => Ok(Some(datagram)),
            None => {
                self.clock.advance(timeout);
                Ok(None)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingDrive {
    pub off: bool,
    pub calls: Vec<(f32, f32)>,
}

impl Drive for RecordingDrive {
    fn is_on(&self) -> bool {
        !self.off
    }

    fn drive(&mut self, linear: f32, angular: f32) -> Result<()> {
        self.calls.push((linear, angular));
        Ok(())
    }
}
