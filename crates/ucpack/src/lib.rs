//! Compact checksummed packet framing for serial and radio links.
//!
//! # Crate Structure
//!
//! - [`buffer`]: fixed-capacity lossy ring buffer for incoming bytes
//! - [`frame`]: packet codec, CRC-8/MAXIM, typed payload shapes, stream adapters
//! - [`link`]: camera pairing handshake and tracking loop (behind `link` feature)

/// Re-export ring buffer types.
pub mod buffer {
    pub use ucpack_buffer::*;
}

/// Re-export frame types.
pub mod frame {
    pub use ucpack_frame::*;
}

/// Re-export link types (requires `link` feature).
#[cfg(feature = "link")]
pub mod link {
    pub use ucpack_link::*;
}
