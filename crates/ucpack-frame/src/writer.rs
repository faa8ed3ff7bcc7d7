use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{encode_frame, FrameConfig, Packet, MAX_FRAME_SIZE};
use crate::error::{FrameError, Result};
use crate::field::{encode_values, Value};
use crate::shape::Shape;

/// Writes complete frames to any `Write` stream.
pub struct PacketWriter<T> {
    inner: T,
    buf: BytesMut,
    data: BytesMut,
    config: FrameConfig,
}

impl<T: Write> PacketWriter<T> {
    /// Create a new packet writer with default markers.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new packet writer with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_FRAME_SIZE),
            data: BytesMut::with_capacity(MAX_FRAME_SIZE),
            config,
        }
    }

    /// Write a complete packet (blocking).
    pub fn write_packet(&mut self, packet: &Packet) -> Result<()> {
        self.send(packet.code, packet.data.as_ref())
    }

    /// Encode and send a command code with raw data bytes.
    pub fn send(&mut self, code: u8, data: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame(&self.config, code, data, &mut self.buf)?;
        self.write_buffered()
    }

    /// Encode and send an arbitrary list of values.
    pub fn send_values(&mut self, code: u8, values: &[Value]) -> Result<()> {
        self.data.clear();
        encode_values(values, &mut self.data);
        self.buf.clear();
        encode_frame(&self.config, code, &self.data, &mut self.buf)?;
        self.write_buffered()
    }

    /// Check `values` against `shape`, then send them.
    pub fn send_shaped(&mut self, code: u8, shape: &Shape, values: &[Value]) -> Result<()> {
        shape.check_values(values)?;
        self.send_values(code, values)
    }

    fn write_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
