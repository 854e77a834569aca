//! Bit-level packing of variable-length codes.
//!
//! Codes are packed LSB-first: the first bit of the stream lands in bit 0 of
//! the first output byte, and the low-order bits of each code are consumed
//! first. When a code does not fit in the room left in the current byte, the
//! low bits that fit fill its free high bits, the byte is emitted, and the
//! remaining high bits of the code carry into the following bytes.
//!
//! # Padding Rules
//! - `finish` emits a partially filled final byte with its unused high bits zero
//! - No bit count is recorded; padding is indistinguishable from data
//!
//! # Example
//! ```
//! use huff_core::bitio::BitWriter;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap(); // bits 0..3
//! writer.write_bits(0b11, 2).unwrap();  // bits 3..5
//! // 000_11_101
//! assert_eq!(writer.finish().unwrap(), vec![0b0001_1101]);
//! ```

use std::io::{self, Write};

/// Completed bytes are handed to the sink in blocks of this size.
const OUTPUT_BUFFER_SIZE: usize = 4096;

/// Writes codes LSB-first into a byte sink.
///
/// # Invariants
/// - `bits_in_byte` is always < 8
/// - bits of `current` at positions >= `bits_in_byte` are zero
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    /// Completed bytes not yet handed to `sink`
    pending: Vec<u8>,
    /// The partially filled byte
    current: u8,
    /// Number of bits used in `current` (0-7)
    bits_in_byte: u32,
    /// Completed bytes emitted so far
    bytes_emitted: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            pending: Vec::with_capacity(OUTPUT_BUFFER_SIZE),
            current: 0,
            bits_in_byte: 0,
            bytes_emitted: 0,
        }
    }

    /// Append the low `count` bits of `value`, lowest bit first.
    ///
    /// Bits of `value` above `count` are ignored. `count` may be 0, in which
    /// case nothing is written.
    pub fn write_bits(&mut self, value: u128, count: u32) -> io::Result<()> {
        let mut value = value;
        let mut remaining = count;

        while remaining > 0 {
            let free = 8 - self.bits_in_byte;

            if remaining < free {
                // Fits with room to spare
                let bits = (value as u8) & ((1u8 << remaining) - 1);
                self.current |= bits << self.bits_in_byte;
                self.bits_in_byte += remaining;
                remaining = 0;
            } else {
                // Fill the current byte, carry the high bits forward
                let mask = ((1u16 << free) - 1) as u8;
                let bits = (value as u8) & mask;
                self.current |= bits << self.bits_in_byte;
                value >>= free;
                remaining -= free;
                self.emit_current()?;
            }
        }

        Ok(())
    }

    fn emit_current(&mut self) -> io::Result<()> {
        self.pending.push(self.current);
        self.current = 0;
        self.bits_in_byte = 0;
        self.bytes_emitted += 1;

        if self.pending.len() == OUTPUT_BUFFER_SIZE {
            self.flush_pending()?;
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        self.sink.write_all(&self.pending)?;
        self.pending.clear();
        Ok(())
    }

    /// Emit any partial byte, flush, and return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if self.bits_in_byte > 0 {
            self.emit_current()?;
        }
        self.flush_pending()?;
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Number of bytes emitted so far, not counting a partial byte.
    pub fn byte_len(&self) -> u64 {
        self.bytes_emitted
    }

    /// Total number of bits written, including the partial byte.
    pub fn bit_len(&self) -> u64 {
        self.bytes_emitted * 8 + self.bits_in_byte as u64
    }
}
