use crate::error::DecodeError;
use crate::error::DecodeResult;

/// Largest compact encoding: a predicate byte followed by the 8-byte network form
pub const MAX_COMPACT_SIZE: usize = 9;

/// Writes bit fields most significant bit first into a fixed stack buffer
pub struct BitWriter {
    bytes: [u8; MAX_COMPACT_SIZE],
    bit_pos: usize, // Global bit position
}

impl BitWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; MAX_COMPACT_SIZE],
            bit_pos: 0,
        }
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) {
        self.write_bits(u64::from(bit), 1);
    }

    /// Write the low `num_bits` bits of `value`.
    ///
    /// Packs whole chunks per byte using shift+mask operations. Bits past the
    /// end of the buffer are dropped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        debug_assert!(num_bits <= 64);
        debug_assert!(self.bit_pos + num_bits <= MAX_COMPACT_SIZE * 8);
        if num_bits == 0 {
            return;
        }
        let mut remaining = num_bits;
        // Shift so the MSB of the value to write is at bit 63
        let mut val = value << (64 - num_bits);

        while remaining > 0 {
            let byte_idx = self.bit_pos / 8;
            let Some(byte) = self.bytes.get_mut(byte_idx) else {
                return;
            };

            let space = 8 - self.bit_pos % 8; // free bits in current byte
            let write_count = remaining.min(space);

            let bits = (val >> (64 - write_count)) as u8;
            *byte |= bits << (space - write_count);

            val <<= write_count;
            remaining -= write_count;
            self.bit_pos += write_count;
        }
    }

    /// Write whole bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_bits(u64::from(b), 8);
        }
    }

    /// Number of bytes touched so far
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// The buffer and the count of bytes written
    #[must_use]
    pub const fn finish(self) -> ([u8; MAX_COMPACT_SIZE], usize) {
        let len = self.len();
        (self.bytes, len)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bit fields most significant bit first
pub struct BitReader<'a> {
    bytes: &'a [u8],
    bit_pos: usize, // Global bit position
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        BitReader { bytes, bit_pos: 0 }
    }

    /// Read a single bit
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if no bits remain.
    pub fn read_bit(&mut self) -> DecodeResult<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Read `num_bits` (at most 64) bits into the low bits of a u64.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::BufferTooShort`] if fewer than `num_bits` remain.
    pub fn read_bits(&mut self, num_bits: usize) -> DecodeResult<u64> {
        debug_assert!(num_bits <= 64);
        if num_bits > self.remaining_bits() {
            return Err(DecodeError::BufferTooShort {
                expected: (self.bit_pos + num_bits).div_ceil(8),
                actual: self.bytes.len(),
            });
        }

        let mut value = 0u64;
        let mut remaining = num_bits;

        while remaining > 0 {
            let byte_idx = self.bit_pos / 8;
            let bit_offset = self.bit_pos % 8;

            let available = 8 - bit_offset; // bits left in this byte
            let read_count = remaining.min(available);

            // Extract `read_count` bits starting at `bit_offset`
            let shift = available - read_count;
            #[allow(clippy::cast_possible_truncation)]
            let mask = ((1u16 << read_count) - 1) as u8;
            let bits = (self.bytes[byte_idx] >> shift) & mask;

            value = (value << read_count) | u64::from(bits);
            self.bit_pos += read_count;
            remaining -= read_count;
        }

        Ok(value)
    }

    /// Get remaining bits count
    #[must_use]
    pub const fn remaining_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_writer() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        writer.write_bit(false);
        writer.write_bit(true);
        writer.write_bit(false);

        let (bytes, len) = writer.finish();
        assert_eq!(len, 1);
        assert_eq!(bytes[0] & 0xF0, 0xA0); // 1010xxxx
    }

    #[test]
    fn test_write_fields_across_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b100, 3);
        writer.write_bits(123, 13);
        let (bytes, len) = writer.finish();
        assert_eq!(&bytes[..len], &[0x80, 0x7B]);

        let mut writer = BitWriter::new();
        writer.write_bits(0xFF, 8);
        writer.write_bytes(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let (bytes, len) = writer.finish();
        assert_eq!(len, 9);
        assert_eq!(bytes, [0xFF, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_bit_reader() {
        let bytes = [0b1010_0101];
        let mut reader = BitReader::new(&bytes);

        assert!(reader.read_bit().unwrap()); // 1
        assert!(!reader.read_bit().unwrap()); // 0
        assert_eq!(reader.read_bits(6).unwrap(), 0b10_0101);
        assert_eq!(reader.remaining_bits(), 0);
    }

    #[test]
    fn test_read_fields_across_bytes() {
        let bytes = [0x80, 0x7B, 0xAA];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(3).unwrap(), 0b100);
        assert_eq!(reader.read_bits(13).unwrap(), 123);
        assert_eq!(reader.remaining_bits(), 8);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAA);
    }

    #[test]
    fn test_read_past_end() {
        let bytes = [0u8; 2];
        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits(12).unwrap(), 0);
        assert_eq!(
            reader.read_bits(5),
            Err(DecodeError::BufferTooShort {
                expected: 3,
                actual: 2
            })
        );
    }
}
