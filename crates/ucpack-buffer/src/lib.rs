//! Fixed-capacity circular byte store.
//!
//! This is the lowest layer of ucpack. Bytes arriving from a transport are
//! pushed into a [`RingBuffer`]; the packet codec reads frames out of it by
//! logical offset from the oldest byte.
//!
//! The buffer never refuses data: pushing into a full buffer evicts the
//! oldest byte. Callers that need loss detection must count bytes themselves.

pub mod error;
pub mod ring;

pub use error::{BufferError, Result};
pub use ring::{Iter, RingBuffer};
