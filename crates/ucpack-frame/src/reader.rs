use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::codec::{FrameConfig, Packet, PacketCodec};
use crate::error::{FrameError, Result};

const READ_CHUNK_SIZE: usize = 1024;

/// Reads validated packets from any `Read` stream.
///
/// Garbage, truncated frames and checksum failures are skipped; callers only
/// ever see packets whose end marker and CRC checked out.
pub struct PacketReader<T> {
    inner: T,
    codec: PacketCodec,
    pending: BytesMut,
}

impl<T: Read> PacketReader<T> {
    /// Create a reader with default markers and ingest capacity.
    pub fn new(inner: T) -> Result<Self> {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Result<Self> {
        Ok(Self {
            inner,
            codec: PacketCodec::with_config(config)?,
            pending: BytesMut::with_capacity(READ_CHUNK_SIZE),
        })
    }

    /// Read the next valid packet (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached, even
    /// if a partial frame is still buffered.
    pub fn read_packet(&mut self) -> Result<Packet> {
        loop {
            if let Some(packet) = self.codec.next_packet(&mut self.pending) {
                return Ok(packet);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            self.pending.extend_from_slice(&chunk[..read]);
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// The codec holding buffered input and the last payload.
    pub fn codec(&self) -> &PacketCodec {
        &self.codec
    }

    /// Current reader configuration.
    pub fn config(&self) -> &FrameConfig {
        self.codec.config()
    }
}
