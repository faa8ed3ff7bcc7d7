//! Typed field descriptors for command payloads.

use std::fmt;

use bytes::{Buf, BufMut};

/// Wire type of a single payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// One unsigned byte.
    Byte,
    /// Little-endian two's complement 16-bit integer.
    Int16,
    /// Little-endian IEEE-754 single precision float.
    Float32,
}

impl FieldKind {
    /// Encoded size in bytes.
    pub const fn size(self) -> usize {
        match self {
            FieldKind::Byte => 1,
            FieldKind::Int16 => 2,
            FieldKind::Float32 => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldKind::Byte => "byte",
            FieldKind::Int16 => "i16",
            FieldKind::Float32 => "f32",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single decoded or to-be-encoded payload field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Byte(u8),
    Int16(i16),
    Float32(f32),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Byte(_) => FieldKind::Byte,
            Value::Int16(_) => FieldKind::Int16,
            Value::Float32(_) => FieldKind::Float32,
        }
    }

    /// Append the little-endian encoding of this value.
    pub fn put<B: BufMut>(&self, dst: &mut B) {
        match *self {
            Value::Byte(b) => dst.put_u8(b),
            Value::Int16(i) => dst.put_i16_le(i),
            Value::Float32(f) => dst.put_f32_le(f),
        }
    }

    /// Read one value of `kind` from `src`.
    ///
    /// Panics if `src` holds fewer than `kind.size()` bytes; callers check the
    /// payload length against the shape first.
    pub fn read<B: Buf>(kind: FieldKind, src: &mut B) -> Self {
        match kind {
            FieldKind::Byte => Value::Byte(src.get_u8()),
            FieldKind::Int16 => Value::Int16(src.get_i16_le()),
            FieldKind::Float32 => Value::Float32(src.get_f32_le()),
        }
    }

    /// Bitwise equality. Unlike `==`, NaN equals a NaN with the same payload
    /// and `0.0` differs from `-0.0`.
    pub fn bit_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float32(a), Value::Float32(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(b) => write!(f, "{b}"),
            Value::Int16(i) => write!(f, "{i}"),
            Value::Float32(v) => write!(f, "{v}"),
        }
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int16(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float32(value)
    }
}

/// Total encoded size of `values`.
pub fn encoded_len(values: &[Value]) -> usize {
    values.iter().map(|v| v.kind().size()).sum()
}

/// Append the encoding of every value in order.
pub fn encode_values<B: BufMut>(values: &[Value], dst: &mut B) {
    for value in values {
        value.put(dst);
    }
}
