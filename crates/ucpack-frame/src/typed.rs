//! Typed pack/unpack helpers, one pair per built-in shape.
//!
//! Each `pack_*` writes a complete frame into the codec's message buffer and
//! returns it. Each `unpack_*` reads the last validated payload and fails with
//! [`FrameError::ShapeMismatch`](crate::FrameError::ShapeMismatch) when its
//! length does not match the shape; dispatch on the code first.

use bytes::Buf;

use crate::codec::PacketCodec;
use crate::error::Result;
use crate::field::Value::{Byte, Float32, Int16};
use crate::shape;

impl PacketCodec {
    pub fn pack_c1b(&mut self, code: u8, b: u8) -> &[u8] {
        self.write_message(code, &[Byte(b)])
    }

    pub fn unpack_c1b(&self) -> Result<(u8, u8)> {
        let mut p = self.shaped_payload(&shape::C1B)?;
        Ok((p.get_u8(), p.get_u8()))
    }

    pub fn pack_c2b(&mut self, code: u8, b1: u8, b2: u8) -> &[u8] {
        self.write_message(code, &[Byte(b1), Byte(b2)])
    }

    pub fn unpack_c2b(&self) -> Result<(u8, u8, u8)> {
        let mut p = self.shaped_payload(&shape::C2B)?;
        Ok((p.get_u8(), p.get_u8(), p.get_u8()))
    }

    pub fn pack_c3b(&mut self, code: u8, b1: u8, b2: u8, b3: u8) -> &[u8] {
        self.write_message(code, &[Byte(b1), Byte(b2), Byte(b3)])
    }

    pub fn unpack_c3b(&self) -> Result<(u8, u8, u8, u8)> {
        let mut p = self.shaped_payload(&shape::C3B)?;
        Ok((p.get_u8(), p.get_u8(), p.get_u8(), p.get_u8()))
    }

    pub fn pack_c1i(&mut self, code: u8, i: i16) -> &[u8] {
        self.write_message(code, &[Int16(i)])
    }

    pub fn unpack_c1i(&self) -> Result<(u8, i16)> {
        let mut p = self.shaped_payload(&shape::C1I)?;
        Ok((p.get_u8(), p.get_i16_le()))
    }

    pub fn pack_c2i(&mut self, code: u8, i1: i16, i2: i16) -> &[u8] {
        self.write_message(code, &[Int16(i1), Int16(i2)])
    }

    pub fn unpack_c2i(&self) -> Result<(u8, i16, i16)> {
        let mut p = self.shaped_payload(&shape::C2I)?;
        Ok((p.get_u8(), p.get_i16_le(), p.get_i16_le()))
    }

    /// Writes `LEN = 7`. Some older peers advertise 5 for this shape, which
    /// no receiver can parse; this codec does not reproduce that.
    pub fn pack_c3i(&mut self, code: u8, i1: i16, i2: i16, i3: i16) -> &[u8] {
        self.write_message(code, &[Int16(i1), Int16(i2), Int16(i3)])
    }

    pub fn unpack_c3i(&self) -> Result<(u8, i16, i16, i16)> {
        let mut p = self.shaped_payload(&shape::C3I)?;
        Ok((p.get_u8(), p.get_i16_le(), p.get_i16_le(), p.get_i16_le()))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pack_c7i(
        &mut self,
        code: u8,
        i1: i16,
        i2: i16,
        i3: i16,
        i4: i16,
        i5: i16,
        i6: i16,
        i7: i16,
    ) -> &[u8] {
        self.write_message(
            code,
            &[
                Int16(i1),
                Int16(i2),
                Int16(i3),
                Int16(i4),
                Int16(i5),
                Int16(i6),
                Int16(i7),
            ],
        )
    }

    #[allow(clippy::type_complexity)]
    pub fn unpack_c7i(&self) -> Result<(u8, i16, i16, i16, i16, i16, i16, i16)> {
        let mut p = self.shaped_payload(&shape::C7I)?;
        Ok((
            p.get_u8(),
            p.get_i16_le(),
            p.get_i16_le(),
            p.get_i16_le(),
            p.get_i16_le(),
            p.get_i16_le(),
            p.get_i16_le(),
            p.get_i16_le(),
        ))
    }

    pub fn pack_c1f(&mut self, code: u8, f: f32) -> &[u8] {
        self.write_message(code, &[Float32(f)])
    }

    pub fn unpack_c1f(&self) -> Result<(u8, f32)> {
        let mut p = self.shaped_payload(&shape::C1F)?;
        Ok((p.get_u8(), p.get_f32_le()))
    }

    pub fn pack_c2f(&mut self, code: u8, f1: f32, f2: f32) -> &[u8] {
        self.write_message(code, &[Float32(f1), Float32(f2)])
    }

    pub fn unpack_c2f(&self) -> Result<(u8, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C2F)?;
        Ok((p.get_u8(), p.get_f32_le(), p.get_f32_le()))
    }

    pub fn pack_c3f(&mut self, code: u8, f1: f32, f2: f32, f3: f32) -> &[u8] {
        self.write_message(code, &[Float32(f1), Float32(f2), Float32(f3)])
    }

    pub fn unpack_c3f(&self) -> Result<(u8, f32, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C3F)?;
        Ok((p.get_u8(), p.get_f32_le(), p.get_f32_le(), p.get_f32_le()))
    }

    pub fn pack_c4f(&mut self, code: u8, f1: f32, f2: f32, f3: f32, f4: f32) -> &[u8] {
        self.write_message(
            code,
            &[Float32(f1), Float32(f2), Float32(f3), Float32(f4)],
        )
    }

    pub fn unpack_c4f(&self) -> Result<(u8, f32, f32, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C4F)?;
        Ok((
            p.get_u8(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pack_c6f(
        &mut self,
        code: u8,
        f1: f32,
        f2: f32,
        f3: f32,
        f4: f32,
        f5: f32,
        f6: f32,
    ) -> &[u8] {
        self.write_message(
            code,
            &[
                Float32(f1),
                Float32(f2),
                Float32(f3),
                Float32(f4),
                Float32(f5),
                Float32(f6),
            ],
        )
    }

    #[allow(clippy::type_complexity)]
    pub fn unpack_c6f(&self) -> Result<(u8, f32, f32, f32, f32, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C6F)?;
        Ok((
            p.get_u8(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pack_c8f(
        &mut self,
        code: u8,
        f1: f32,
        f2: f32,
        f3: f32,
        f4: f32,
        f5: f32,
        f6: f32,
        f7: f32,
        f8: f32,
    ) -> &[u8] {
        self.write_message(
            code,
            &[
                Float32(f1),
                Float32(f2),
                Float32(f3),
                Float32(f4),
                Float32(f5),
                Float32(f6),
                Float32(f7),
                Float32(f8),
            ],
        )
    }

    #[allow(clippy::type_complexity)]
    pub fn unpack_c8f(&self) -> Result<(u8, f32, f32, f32, f32, f32, f32, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C8F)?;
        Ok((
            p.get_u8(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
        ))
    }

    pub fn pack_c1b3f(&mut self, code: u8, b: u8, f1: f32, f2: f32, f3: f32) -> &[u8] {
        self.write_message(code, &[Byte(b), Float32(f1), Float32(f2), Float32(f3)])
    }

    pub fn unpack_c1b3f(&self) -> Result<(u8, u8, f32, f32, f32)> {
        let mut p = self.shaped_payload(&shape::C1B3F)?;
        Ok((
            p.get_u8(),
            p.get_u8(),
            p.get_f32_le(),
            p.get_f32_le(),
            p.get_f32_le(),
        ))
    }

    pub fn pack_c2b1f(&mut self, code: u8, b1: u8, b2: u8, f: f32) -> &[u8] {
        self.write_message(code, &[Byte(b1), Byte(b2), Float32(f)])
    }

    pub fn unpack_c2b1f(&self) -> Result<(u8, u8, u8, f32)> {
        let mut p = self.shaped_payload(&shape::C2B1F)?;
        Ok((p.get_u8(), p.get_u8(), p.get_u8(), p.get_f32_le()))
    }
}
