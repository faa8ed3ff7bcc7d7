//! Tokio codec adapter for async transports.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{encode_frame, FrameConfig, Packet, PacketCodec};
use crate::error::{FrameError, Result};

/// `tokio_util` codec over [`PacketCodec`].
///
/// Decoding moves incoming bytes into the ring buffer as fast as it has room
/// and yields each validated packet; corrupt frames are dropped silently.
#[derive(Debug)]
pub struct UcPackCodec {
    inner: PacketCodec,
}

impl UcPackCodec {
    /// Create a codec with default markers and the given ingest capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: PacketCodec::new(capacity)?,
        })
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Result<Self> {
        Ok(Self {
            inner: PacketCodec::with_config(config)?,
        })
    }

    /// The underlying packet codec.
    pub fn codec(&self) -> &PacketCodec {
        &self.inner
    }
}

impl Decoder for UcPackCodec {
    type Item = Packet;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        Ok(self.inner.next_packet(src))
    }
}

impl Encoder<Packet> for UcPackCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<()> {
        encode_frame(self.inner.config(), item.code, &item.data, dst)?;
        Ok(())
    }
}
