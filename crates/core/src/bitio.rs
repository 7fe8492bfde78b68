//! Bit-level I/O for the packed bitstream.
//!
//! `BitWriter` and `BitReader` both operate MSB-first: the first bit written
//! lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: a partial final byte is completed with trailing zeros. The
//!   codec never relies on this; it sizes its leading padding so the stream
//!   ends exactly on a byte boundary.
//! - BitReader: `skip_zeros` consumes the leading marker/padding run that
//!   precedes the first set bit.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0, 3).unwrap();      // 0, 0, 0
//! writer.write_bits(0b10110, 5).unwrap(); // 1, 0, 1, 1, 0
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b0001_0110]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.skip_zeros(), 3);
//! assert_eq!(reader.read_bits(5).unwrap(), 0b10110);
//! ```

use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - `bit_buffer` holds the `bit_count` pending bits, MSB-aligned
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Create a BitWriter that expects roughly `bits` bits of output.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. Writing value=0b101 with count=3 writes
    /// bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let bits_to_write = remaining.min(8 - self.bit_count as usize);
            let shift = remaining - bits_to_write;
            let mask = (1u64 << bits_to_write) - 1;
            let bits = ((value >> shift) & mask) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= bits_to_write;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write `count` zero bits.
    pub fn write_zeros(&mut self, count: usize) {
        for _ in 0..count {
            self.write_bit(false);
        }
    }

    /// Finish writing and return the output bytes.
    ///
    /// A partial final byte is padded with trailing zeros.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// True when the bits written so far end on a byte boundary.
    pub fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new BitReader for the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read up to 64 bits from the input.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte_idx = self.bit_position / 8;
            let bit_offset = self.bit_position % 8;

            let bits_in_byte = 8 - bit_offset;
            let bits_to_read = remaining.min(bits_in_byte);

            let byte = self.data[byte_idx];
            let mask = ((1u16 << bits_to_read) - 1) as u8;
            let bits = (byte >> (bits_in_byte - bits_to_read)) & mask;

            result = (result << bits_to_read) | bits as u64;

            self.bit_position += bits_to_read;
            remaining -= bits_to_read;
        }

        Ok(result)
    }

    /// Read a single bit, or `None` at end of input.
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Some(bit)
    }

    /// Consume zero bits up to (not including) the first set bit.
    ///
    /// Returns how many bits were skipped. At end of input the whole
    /// remainder has been skipped.
    pub fn skip_zeros(&mut self) -> usize {
        let start = self.bit_position;

        // Whole zero bytes first, then bit by bit inside the first non-zero byte.
        while self.bit_position % 8 == 0
            && self.bit_position < self.data.len() * 8
            && self.data[self.bit_position / 8] == 0
        {
            self.bit_position += 8;
        }
        while let Some(byte) = self.data.get(self.bit_position / 8) {
            if byte & (0x80 >> (self.bit_position % 8)) != 0 {
                break;
            }
            self.bit_position += 1;
        }

        self.bit_position - start
    }

    /// Return the number of bits remaining in the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if we're at the end of the buffer.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}
