//! CRC-8/MAXIM (a.k.a. CRC-8/Dallas 1-Wire).
//!
//! Reflected algorithm: polynomial 0x31 applied LSB-first (0x8C), seed 0x00,
//! no final XOR. Must match the peer byte for byte.

/// Reflected CRC-8/MAXIM polynomial.
pub const CRC8_MAXIM_POLY: u8 = 0x8C;

/// Compute the CRC-8/MAXIM of `data`.
pub fn crc8_maxim(data: &[u8]) -> u8 {
    let mut digest = Crc8::new();
    digest.update(data);
    digest.finalize()
}

/// Incremental CRC-8/MAXIM digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc8 {
    crc: u8,
}

impl Crc8 {
    pub const fn new() -> Self {
        Self { crc: 0x00 }
    }

    /// Feed one byte.
    pub fn push(&mut self, byte: u8) {
        let mut data = byte;
        for _ in 0..8 {
            let mix = (self.crc ^ data) & 0x01;
            self.crc >>= 1;
            if mix != 0 {
                self.crc ^= CRC8_MAXIM_POLY;
            }
            data >>= 1;
        }
    }

    /// Feed a run of bytes.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.push(byte);
        }
    }

    pub fn finalize(self) -> u8 {
        self.crc
    }
}
