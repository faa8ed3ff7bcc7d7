use bytes::{BufMut, Bytes, BytesMut};
use ucpack_buffer::RingBuffer;

use crate::crc::{crc8_maxim, Crc8};
use crate::error::{FrameError, Result};
use crate::field::{encoded_len, Value};
use crate::shape::Shape;

/// Default start marker: `'A'`.
pub const DEFAULT_START_MARKER: u8 = b'A';

/// Default end marker: `'#'`.
pub const DEFAULT_END_MARKER: u8 = b'#';

/// Framing bytes around the payload: start (1) + length (1) + end (1) + crc (1).
pub const FRAME_OVERHEAD: usize = 4;

/// Largest `CODE + DATA` region the one-byte length field can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// Largest frame on the wire.
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD + FRAME_OVERHEAD;

/// Default ingest window: two maximal frames, so a frame of any length can
/// complete while the next one is already arriving.
pub const DEFAULT_CAPACITY: usize = 2 * MAX_FRAME_SIZE;

/// Smallest ingest window that can hold a frame carrying a command code.
pub const MIN_CAPACITY: usize = FRAME_OVERHEAD + 1;

/// What the deframer does when a frame's end marker is wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndMarkerRecovery {
    /// Drop the start marker so the next poll resynchronizes past it.
    #[default]
    DropStart,
    /// Leave the buffer untouched. Matches legacy peers, but a misread length
    /// keeps failing until eviction pushes the bad start marker out.
    Hold,
}

/// Configuration for the packet codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Byte that opens every frame. Default: `'A'`.
    pub start_marker: u8,
    /// Byte that closes the payload, before the checksum. Default: `'#'`.
    pub end_marker: u8,
    /// Ingest ring buffer capacity in bytes. Default: [`DEFAULT_CAPACITY`].
    pub capacity: usize,
    /// Recovery policy for frames with a bad end marker.
    pub end_marker_recovery: EndMarkerRecovery,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            start_marker: DEFAULT_START_MARKER,
            end_marker: DEFAULT_END_MARKER,
            capacity: DEFAULT_CAPACITY,
            end_marker_recovery: EndMarkerRecovery::default(),
        }
    }
}

impl FrameConfig {
    /// Reject configurations that cannot frame or resynchronize reliably.
    ///
    /// The codec itself accepts any non-zero capacity; this is the stricter
    /// check for callers that take markers from user input.
    pub fn validate(&self) -> Result<()> {
        if self.start_marker == self.end_marker {
            return Err(FrameError::InvalidConfig(format!(
                "start and end markers must differ (both 0x{:02X})",
                self.start_marker
            )));
        }
        if self.capacity < MIN_CAPACITY {
            return Err(FrameError::InvalidConfig(format!(
                "capacity {} is below the minimum frame size {}",
                self.capacity, MIN_CAPACITY
            )));
        }
        Ok(())
    }
}

/// An owned, validated payload: command code plus raw data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Application-defined command code.
    pub code: u8,
    /// Data bytes following the code.
    pub data: Bytes,
}

impl Packet {
    /// Create a new packet.
    pub fn new(code: u8, data: impl Into<Bytes>) -> Self {
        Self {
            code,
            data: data.into(),
        }
    }

    /// Build a packet from a `CODE + DATA` payload. `None` when empty.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        let (&code, data) = payload.split_first()?;
        Some(Self::new(code, Bytes::copy_from_slice(data)))
    }

    /// Value of the LEN byte for this packet.
    pub fn payload_len(&self) -> usize {
        1 + self.data.len()
    }

    /// The total wire size of this packet (framing + payload).
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.payload_len()
    }

    /// Decode the data bytes as `shape`.
    pub fn values(&self, shape: &Shape) -> Result<Vec<Value>> {
        let mut payload = Vec::with_capacity(self.payload_len());
        payload.push(self.code);
        payload.extend_from_slice(&self.data);
        shape.decode(&payload).map(|(_, values)| values)
    }
}

/// Encode a frame into the wire format. Returns the number of bytes written.
///
/// Wire format:
/// ```text
/// ┌───────┬───────┬──────┬───────────┬─────┬───────┐
/// │ START │  LEN  │ CODE │ DATA      │ END │ CRC   │
/// │ (1B)  │ (1B)  │ (1B) │ (LEN-1 B) │(1B) │ (1B)  │
/// └───────┴───────┴──────┴───────────┴─────┴───────┘
/// ```
/// `LEN` counts `CODE + DATA`; `CRC` is CRC-8/MAXIM over `CODE + DATA`.
pub fn encode_frame(config: &FrameConfig, code: u8, data: &[u8], dst: &mut BytesMut) -> Result<usize> {
    let payload_len = 1 + data.len();
    if payload_len > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: MAX_PAYLOAD,
        });
    }

    let mut crc = Crc8::new();
    crc.push(code);
    crc.update(data);

    dst.reserve(payload_len + FRAME_OVERHEAD);
    dst.put_u8(config.start_marker);
    dst.put_u8(payload_len as u8);
    dst.put_u8(code);
    dst.put_slice(data);
    dst.put_u8(config.end_marker);
    dst.put_u8(crc.finalize());
    Ok(payload_len + FRAME_OVERHEAD)
}

/// Outcome of one deframing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    /// A validated payload is available.
    Ready,
    /// Nothing buffered, or only bytes that were not a start marker.
    NoData,
    /// A frame has started but not all of its bytes have arrived.
    Incomplete { buffered: usize, required: usize },
    /// The frame's checksum did not match; its start marker was dropped.
    ChecksumMismatch { received: u8, computed: u8 },
    /// The byte where the end marker belongs held `found` instead.
    EndMarkerMismatch { found: u8, resynced: bool },
    /// `LEN` was zero, leaving no room for a command code; its start marker
    /// was dropped.
    EmptyFrame,
}

impl ExtractStatus {
    pub fn is_ready(self) -> bool {
        matches!(self, ExtractStatus::Ready)
    }

    /// True when a rejected frame was dropped from the buffer, so polling
    /// again may succeed without more input.
    pub fn advanced(self) -> bool {
        match self {
            ExtractStatus::ChecksumMismatch { .. } | ExtractStatus::EmptyFrame => true,
            ExtractStatus::EndMarkerMismatch { resynced, .. } => resynced,
            _ => false,
        }
    }
}

/// Stateful packet codec: an ingest ring buffer, a single decoded payload
/// slot, and an outbound message buffer.
///
/// Not synchronized. Callers sharing a codec across threads must serialize
/// access themselves.
#[derive(Debug)]
pub struct PacketCodec {
    ring: RingBuffer,
    config: FrameConfig,
    payload: Vec<u8>,
    message: BytesMut,
}

impl PacketCodec {
    /// Create a codec with default markers and the given ingest capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(FrameConfig {
            capacity,
            ..FrameConfig::default()
        })
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Result<Self> {
        if config.start_marker == config.end_marker {
            tracing::warn!(
                marker = config.start_marker,
                "start and end markers are equal; resynchronization is unreliable"
            );
        }
        Ok(Self {
            ring: RingBuffer::new(config.capacity)?,
            payload: Vec::with_capacity(MAX_PAYLOAD),
            message: BytesMut::with_capacity(MAX_FRAME_SIZE),
            config,
        })
    }

    /// Current codec configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Append raw bytes from the transport. Oldest bytes are evicted when
    /// the ingest buffer overflows.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.ring.insert(bytes);
    }

    /// Number of bytes waiting in the ingest buffer.
    pub fn buffered(&self) -> usize {
        self.ring.len()
    }

    /// Try to deframe one payload from the ingest buffer.
    ///
    /// Leading bytes that are not the start marker are discarded. A frame is
    /// consumed only once its end marker and checksum both check out; until
    /// then the buffer is left as is, except that a zero `LEN`, a checksum
    /// failure and (with [`EndMarkerRecovery::DropStart`]) an end marker
    /// failure drop the frame's start marker.
    pub fn extract(&mut self) -> ExtractStatus {
        if self.ring.is_empty() {
            return ExtractStatus::NoData;
        }

        let mut skipped = 0usize;
        while let Some(byte) = self.ring.top() {
            if byte == self.config.start_marker {
                break;
            }
            self.ring.pop();
            skipped += 1;
        }
        if skipped > 0 {
            tracing::debug!(skipped, "discarded bytes before start marker");
        }

        let buffered = self.ring.len();
        if buffered == 0 {
            return ExtractStatus::NoData;
        }
        if buffered < 2 {
            return ExtractStatus::Incomplete {
                buffered,
                required: 2,
            };
        }

        let payload_size = self.ring[1] as usize;
        if payload_size == 0 {
            self.ring.discard(1);
            tracing::debug!("zero-length frame");
            return ExtractStatus::EmptyFrame;
        }
        let required = payload_size + FRAME_OVERHEAD;
        if buffered < required {
            return ExtractStatus::Incomplete { buffered, required };
        }

        let found = self.ring[payload_size + 2];
        if found != self.config.end_marker {
            let resynced = match self.config.end_marker_recovery {
                EndMarkerRecovery::DropStart => {
                    self.ring.discard(1);
                    true
                }
                EndMarkerRecovery::Hold => false,
            };
            tracing::debug!(payload_size, found, resynced, "end marker mismatch");
            return ExtractStatus::EndMarkerMismatch { found, resynced };
        }

        let mut crc = Crc8::new();
        for offset in 2..2 + payload_size {
            crc.push(self.ring[offset]);
        }
        let computed = crc.finalize();
        let received = self.ring[payload_size + 3];
        if computed != received {
            self.ring.discard(1);
            tracing::debug!(payload_size, received, computed, "checksum mismatch");
            return ExtractStatus::ChecksumMismatch { received, computed };
        }

        self.payload.resize(payload_size, 0);
        self.ring.copy_range(2, &mut self.payload);
        self.ring.discard(required);
        tracing::trace!(payload_size, "extracted payload");
        ExtractStatus::Ready
    }

    /// Returns true exactly when a validated payload has just been extracted.
    pub fn try_extract_payload(&mut self) -> bool {
        self.extract().is_ready()
    }

    /// The last validated `CODE + DATA` payload. Empty until the first
    /// successful extraction; overwritten by the next one.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Command code of the last validated payload.
    pub fn payload_code(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Copy the last validated payload out as an owned packet.
    pub fn packet(&self) -> Option<Packet> {
        Packet::from_payload(&self.payload)
    }

    /// Move bytes from `src` into the ingest buffer until a packet is ready.
    ///
    /// Bytes are moved no faster than the ring has room, so a burst holding
    /// several frames is not evicted before it is parsed. Returns `None` once
    /// `src` is drained without completing a packet; leftover partial frames
    /// stay buffered for the next call.
    pub fn next_packet(&mut self, src: &mut BytesMut) -> Option<Packet> {
        loop {
            let status = self.extract();
            if status.is_ready() {
                if let Some(packet) = self.packet() {
                    return Some(packet);
                }
            }
            if status.advanced() {
                continue;
            }
            if src.is_empty() {
                return None;
            }

            let n = self.ring.free().max(1).min(src.len());
            let chunk = src.split_to(n);
            self.ring.insert(&chunk);
        }
    }

    /// Drop all buffered input and the decoded payload.
    pub fn reset(&mut self) {
        self.ring.clear();
        self.payload.clear();
    }

    /// The last packed outbound message.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Length of the last packed outbound message.
    pub fn message_len(&self) -> usize {
        self.message.len()
    }

    /// Pack `values` after checking them against `shape`.
    pub fn pack(&mut self, code: u8, shape: &Shape, values: &[Value]) -> Result<&[u8]> {
        shape.check_values(values)?;
        Ok(self.write_message(code, values))
    }

    /// Pack an arbitrary list of values; `LEN` is derived from the values.
    pub fn pack_values(&mut self, code: u8, values: &[Value]) -> Result<&[u8]> {
        let size = 1 + encoded_len(values);
        if size > MAX_PAYLOAD {
            return Err(FrameError::PayloadTooLarge {
                size,
                max: MAX_PAYLOAD,
            });
        }
        Ok(self.write_message(code, values))
    }

    /// Decode the last validated payload as `shape`.
    pub fn unpack(&self, shape: &Shape) -> Result<(u8, Vec<Value>)> {
        shape.decode(&self.payload)
    }

    /// Write a framed message for values already known to fit.
    pub(crate) fn write_message(&mut self, code: u8, values: &[Value]) -> &[u8] {
        let payload_len = 1 + encoded_len(values);
        debug_assert!(payload_len <= MAX_PAYLOAD);

        self.message.clear();
        self.message.put_u8(self.config.start_marker);
        self.message.put_u8(payload_len as u8);
        self.message.put_u8(code);
        for value in values {
            value.put(&mut self.message);
        }
        self.message.put_u8(self.config.end_marker);
        let crc = crc8_maxim(&self.message[2..2 + payload_len]);
        self.message.put_u8(crc);
        &self.message
    }

    /// The payload, checked to be exactly `shape`'s length.
    pub(crate) fn shaped_payload(&self, shape: &Shape) -> Result<&[u8]> {
        shape.check_payload(&self.payload)?;
        Ok(&self.payload)
    }
}
