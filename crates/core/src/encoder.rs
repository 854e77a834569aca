//! Payload encoding.
//!
//! The encoder holds the artifacts of the first pass (frequencies, tree,
//! codes) and turns a second, independent read of the same input into a
//! complete container.

use std::io::{self, Read, Write};

use tracing::{debug, instrument};

use crate::bitio::BitWriter;
use crate::builder::TreeBuilder;
use crate::codes::CodeTable;
use crate::container::write_header;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::source::{read_chunks, ByteSource};
use crate::tree::Node;

/// Sizes of one written container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    /// Magic + tree block + separator
    pub header_bytes: u64,
    /// Bytes read in the encoding pass
    pub input_bytes: u64,
    /// Packed code bits, padding excluded
    pub payload_bits: u64,
    /// Payload bytes, padding included
    pub payload_bytes: u64,
}

impl EncodeStats {
    pub fn container_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }
}

/// Frequency table, tree and code table for one input.
#[derive(Debug, Clone)]
pub struct Encoder {
    frequencies: FrequencyTable,
    tree: Node,
    codes: CodeTable,
}

impl Encoder {
    /// Build the tree and codes for `frequencies`.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if every count is zero
    /// - `TreeError::CodeLengthTooLong` if the tree is too deep for the code register
    pub fn from_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        let tree = TreeBuilder::new().build(&frequencies)?;
        let codes = CodeTable::from_tree(&tree)?;
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Run the frequency pass over `source` and build the codes.
    #[instrument(level = "debug", skip_all)]
    pub fn from_source<S: ByteSource>(source: &S) -> Result<Self> {
        let frequencies = FrequencyTable::from_reader(source.open()?)?;
        debug!(
            bytes = frequencies.total(),
            distinct = frequencies.distinct(),
            "frequency pass complete"
        );
        Self::from_frequencies(frequencies)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Number of payload bits the counted input encodes to.
    pub fn expected_payload_bits(&self) -> u64 {
        self.codes
            .iter()
            .map(|(byte, entry)| entry.length as u64 * self.frequencies.get(byte))
            .sum()
    }

    /// Pack the codes of every byte of `input` into `writer`.
    ///
    /// # Errors
    /// `Error::Io` on read or write failure, or with `InvalidData` if `input`
    /// holds a byte the first pass never saw.
    pub fn encode_payload<R: Read, W: Write>(&self, input: R, writer: W) -> Result<EncodeStats> {
        let mut bits = BitWriter::new(writer);

        let input_bytes = read_chunks(input, |chunk| {
            for &byte in chunk {
                let entry = self.codes.get(byte).ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "byte {:#04x} not in code table; input changed between passes",
                            byte
                        ),
                    )
                })?;
                bits.write_bits(entry.code, entry.length)?;
            }
            Ok(())
        })?;

        let payload_bits = bits.bit_len();
        let payload_bytes = payload_bits.div_ceil(8);
        bits.finish()?;

        Ok(EncodeStats {
            header_bytes: 0,
            input_bytes,
            payload_bits,
            payload_bytes,
        })
    }

    /// Write the complete container: magic, tree block, separator, payload.
    #[instrument(level = "debug", skip_all)]
    pub fn write_container<R: Read, W: Write>(
        &self,
        input: R,
        mut writer: W,
    ) -> Result<EncodeStats> {
        let header_bytes = write_header(&self.tree, &mut writer)? as u64;
        let stats = self.encode_payload(input, &mut writer)?;
        writer.flush()?;

        debug!(
            header_bytes,
            payload_bits = stats.payload_bits,
            payload_bytes = stats.payload_bytes,
            "container written"
        );
        Ok(EncodeStats {
            header_bytes,
            ..stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{MAGIC, SEPARATOR};
    use crate::error::Error;

    fn encoder_for(data: &[u8]) -> Encoder {
        Encoder::from_frequencies(FrequencyTable::from_bytes(data)).unwrap()
    }

    fn payload_for(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encoder_for(data).encode_payload(data, &mut out).unwrap();
        out
    }

    #[test]
    fn test_two_symbol_payload() {
        // a = 1, b = 0; "aaab" packs to bits 1,1,1,0
        assert_eq!(payload_for(b"aaab"), vec![0b0000_0111]);
    }

    #[test]
    fn test_single_symbol_payload_is_empty() {
        assert!(payload_for(b"xxxxxxxxxxxx").is_empty());
    }

    #[test]
    fn test_payload_crosses_byte_boundary() {
        // c = 0 (1 bit), a = 01 (2 bits), b = 11 (2 bits)
        // "abccab" -> 1,0 1,1 0 0 1,0 1,1 = 10 bits
        let data = b"abccab";
        assert_eq!(encoder_for(data).expected_payload_bits(), 10);
        assert_eq!(payload_for(data), vec![0b0100_1101, 0b0000_0011]);
    }

    #[test]
    fn test_bits_match_expected() {
        let data = b"mississippi river banks";
        let encoder = encoder_for(data);
        let stats = encoder.encode_payload(&data[..], io::sink()).unwrap();
        assert_eq!(stats.payload_bits, encoder.expected_payload_bits());
        assert_eq!(stats.payload_bytes, stats.payload_bits.div_ceil(8));
        assert_eq!(stats.input_bytes, data.len() as u64);
    }

    #[test]
    fn test_unknown_byte_is_invalid_data() {
        let encoder = encoder_for(b"aaab");
        let result = encoder.encode_payload(&b"abc"[..], io::sink());
        match result {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected InvalidData, got {:?}", other),
        }
    }

    #[test]
    fn test_write_container_layout() {
        let data = b"aaab";
        let mut out = Vec::new();
        let stats = encoder_for(data).write_container(&data[..], &mut out).unwrap();

        assert_eq!(stats.header_bytes, 40);
        assert_eq!(stats.container_bytes(), out.len() as u64);
        assert_eq!(&out[..8], &MAGIC);
        assert_eq!(&out[32..40], &SEPARATOR);
        assert_eq!(&out[40..], &[0x07u8]);
    }

    #[test]
    fn test_from_source_empty() {
        let empty: &[u8] = b"";
        assert!(matches!(Encoder::from_source(&empty), Err(Error::EmptyInput)));
    }
}
