//! Fixed payload shapes.
//!
//! A shape is the ordered list of fields that follows the command code. The
//! length byte and all offsets are derived from the field list, so a shape
//! can never advertise a length that disagrees with what it writes.
//!
//! Names follow the `C<count><type>` convention used by peers: `C3F` is a
//! code followed by three floats, `C2B1F` a code, two bytes and a float.

use bytes::Buf;

use crate::codec::FRAME_OVERHEAD;
use crate::error::{FrameError, Result};
use crate::field::{FieldKind, Value};

use crate::field::FieldKind::{Byte as B, Float32 as F, Int16 as I};

/// A named, ordered list of payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    name: &'static str,
    fields: &'static [FieldKind],
}

impl Shape {
    pub const fn new(name: &'static str, fields: &'static [FieldKind]) -> Self {
        Self { name, fields }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn fields(&self) -> &'static [FieldKind] {
        self.fields
    }

    /// Encoded size of the data fields, excluding the code byte.
    pub const fn data_len(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].size();
            i += 1;
        }
        total
    }

    /// Value of the LEN byte: code plus data.
    pub const fn payload_len(&self) -> usize {
        1 + self.data_len()
    }

    /// Total bytes on the wire, framing included.
    pub const fn frame_len(&self) -> usize {
        self.payload_len() + FRAME_OVERHEAD
    }

    /// Look up a built-in shape by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<&'static Shape> {
        ALL.iter().find(|shape| shape.name.eq_ignore_ascii_case(name))
    }

    /// Check that `values` match this shape field by field.
    pub fn check_values(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.fields.len() {
            return Err(FrameError::ValueCount {
                shape: self.name,
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        for (index, (value, &expected)) in values.iter().zip(self.fields).enumerate() {
            if value.kind() != expected {
                return Err(FrameError::ValueMismatch {
                    shape: self.name,
                    index,
                    expected,
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Check that a `CODE + DATA` payload has exactly this shape's length.
    pub fn check_payload(&self, payload: &[u8]) -> Result<()> {
        if payload.is_empty() {
            return Err(FrameError::NoPayload);
        }
        if payload.len() != self.payload_len() {
            return Err(FrameError::ShapeMismatch {
                shape: self.name,
                expected: self.payload_len(),
                actual: payload.len(),
            });
        }
        Ok(())
    }

    /// Decode a `CODE + DATA` payload into its code and field values.
    pub fn decode(&self, payload: &[u8]) -> Result<(u8, Vec<Value>)> {
        self.check_payload(payload)?;
        let mut src = payload;
        let code = src.get_u8();
        let values = self
            .fields
            .iter()
            .map(|&kind| Value::read(kind, &mut src))
            .collect();
        Ok((code, values))
    }
}

pub const C1B: Shape = Shape::new("C1B", &[B]);
pub const C2B: Shape = Shape::new("C2B", &[B, B]);
pub const C3B: Shape = Shape::new("C3B", &[B, B, B]);
pub const C1I: Shape = Shape::new("C1I", &[I]);
pub const C2I: Shape = Shape::new("C2I", &[I, I]);
pub const C3I: Shape = Shape::new("C3I", &[I, I, I]);
pub const C7I: Shape = Shape::new("C7I", &[I, I, I, I, I, I, I]);
pub const C1F: Shape = Shape::new("C1F", &[F]);
pub const C2F: Shape = Shape::new("C2F", &[F, F]);
pub const C3F: Shape = Shape::new("C3F", &[F, F, F]);
pub const C4F: Shape = Shape::new("C4F", &[F, F, F, F]);
pub const C6F: Shape = Shape::new("C6F", &[F, F, F, F, F, F]);
pub const C8F: Shape = Shape::new("C8F", &[F, F, F, F, F, F, F, F]);
pub const C1B3F: Shape = Shape::new("C1B3F", &[B, F, F, F]);
pub const C2B1F: Shape = Shape::new("C2B1F", &[B, B, F]);

/// Every built-in shape.
pub const ALL: &[Shape] = &[
    C1B, C2B, C3B, C1I, C2I, C3I, C7I, C1F, C2F, C3F, C4F, C6F, C8F, C1B3F, C2B1F,
];
