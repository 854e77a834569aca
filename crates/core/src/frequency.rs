//! Byte frequency counting.
//!
//! The input is treated as raw bytes; there is no character-set
//! interpretation. The stream is consumed exactly once.

use std::io::Read;

use crate::error::Result;
use crate::source::read_chunks;

/// Occurrence counts for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count every byte of `reader` until end of stream.
    ///
    /// # Errors
    /// Any read failure other than `Interrupted` is returned as `Error::Io`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        read_chunks(reader, |chunk| {
            table.add_bytes(chunk);
            Ok(())
        })?;
        Ok(table)
    }

    /// Count the bytes of an in-memory slice.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        table.add_bytes(bytes);
        table
    }

    /// Build a table directly from 256 counts.
    pub fn from_counts(counts: [u64; 256]) -> Self {
        Self { counts }
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.counts[byte as usize] += 1;
        }
    }

    /// Count recorded for `byte` (0 if it never occurred).
    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Iterate `(byte, count)` for bytes that occurred at least once.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=255u8)
            .map(move |byte| (byte, self.counts[byte as usize]))
            .filter(|&(_, count)| count > 0)
    }

    /// Number of distinct byte values that occurred.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_counts_raw_bytes() {
        let table = FrequencyTable::from_bytes(&[0x00, 0xFF, 0xFF, b'a']);
        assert_eq!(table.get(0x00), 1);
        assert_eq!(table.get(0xFF), 2);
        assert_eq!(table.get(b'a'), 1);
        assert_eq!(table.get(b'b'), 0);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn test_reader_matches_slice_across_buffer_boundary() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 7) as u8).collect();
        let from_reader = FrequencyTable::from_reader(&data[..]).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
        assert_eq!(from_reader.total(), 10_000);
    }

    #[test]
    fn test_empty_stream() {
        let table = FrequencyTable::from_reader(io::empty()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.present().count(), 0);
    }

    #[test]
    fn test_present_skips_zero_counts() {
        let table = FrequencyTable::from_bytes(b"zzya");
        let present: Vec<_> = table.present().collect();
        assert_eq!(present, vec![(b'a', 1), (b'y', 1), (b'z', 2)]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_read_error_propagates() {
        let result = FrequencyTable::from_reader(FailingReader);
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }
}
