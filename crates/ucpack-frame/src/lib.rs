//! Checksummed packet framing for byte-oriented links.
//!
//! Every frame on the wire is:
//! - a start marker byte (`'A'` by default)
//! - a 1-byte length counting the command code and data
//! - the command code and data bytes
//! - an end marker byte (`'#'` by default)
//! - a CRC-8/MAXIM checksum over the code and data
//!
//! Data fields are little-endian bytes, 16-bit integers and 32-bit floats.
//! Fixed field lists ("shapes", such as `C3F`) give typed pack/unpack
//! helpers on [`PacketCodec`].
//!
//! The receive side tolerates garbage, truncation and corruption: it scans
//! for the start marker, waits for complete frames and drops frames whose
//! end marker or checksum do not match.

#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod command;
pub mod crc;
pub mod error;
pub mod field;
pub mod reader;
pub mod shape;
mod typed;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::UcPackCodec;
pub use codec::{
    encode_frame, EndMarkerRecovery, ExtractStatus, FrameConfig, Packet, PacketCodec,
    DEFAULT_CAPACITY, DEFAULT_END_MARKER, DEFAULT_START_MARKER, FRAME_OVERHEAD, MAX_FRAME_SIZE,
    MAX_PAYLOAD, MIN_CAPACITY,
};
pub use command::{command_name, command_shape, TARGET_LOST, TRACK, USER_COMMAND_START};
pub use crc::{crc8_maxim, Crc8};
pub use error::{FrameError, Result};
pub use field::{FieldKind, Value};
pub use reader::PacketReader;
pub use shape::Shape;
pub use writer::PacketWriter;
