use std::fmt;
use std::time::Duration;

use crate::error::Result;

/// Six-byte hardware address of a radio peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The all-ones broadcast address.
    pub const BROADCAST: MacAddress = MacAddress([0xFF; 6]);

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

/// Connectionless datagram radio.
///
/// Implementations wrap the platform's peer-to-peer radio and map its
/// failures to [`LinkError::Radio`](crate::LinkError::Radio).
pub trait Radio {
    /// Send `message` to every listening peer.
    fn broadcast(&mut self, message: &[u8]) -> Result<()>;

    /// Wait up to `timeout` for one datagram.
    fn recv(&mut self, timeout: Duration) -> Result<Option<(MacAddress, Vec<u8>)>>;
}

impl<R: Radio + ?Sized> Radio for &mut R {
    fn broadcast(&mut self, message: &[u8]) -> Result<()> {
        (**self).broadcast(message)
    }

    fn recv(&mut self, timeout: Duration) -> Result<Option<(MacAddress, Vec<u8>)>> {
        (**self).recv(timeout)
    }
}
