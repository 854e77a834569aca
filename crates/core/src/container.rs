//! Output container layout and inspection.
//!
//! # Container Format
//!
//! ```text
//! +----------------------+
//! | Magic (8 bytes)      |  7B 68 75 7C 6D 7D 66 66
//! +----------------------+
//! | Tree block           |  pre-order node records, 8 bytes each
//! | (8 × nodes)          |
//! +----------------------+
//! | Separator (8 bytes)  |  all zero
//! +----------------------+
//! | Payload              |  LSB-first packed codes, zero-padded
//! | (variable)           |  to a whole byte
//! +----------------------+
//! ```
//!
//! There is no length field and no bit count. The payload ends where the
//! container ends, and the padding bits of its last byte cannot be told apart
//! from codes without knowing the input length from elsewhere.

use std::io::{self, Write};

use crate::error::{FormatError, Result};
use crate::serialize::{parse_tree_block, write_tree_block, RECORD_SIZE};
use crate::tree::Node;

/// Container magic. Any change to this sequence breaks the format.
pub const MAGIC: [u8; 8] = [0x7B, 0x68, 0x75, 0x7C, 0x6D, 0x7D, 0x66, 0x66];

/// Zero bytes written between the tree block and the payload.
pub const SEPARATOR: [u8; 8] = [0; 8];

/// Write magic, tree block and separator. Returns the number of bytes written.
pub fn write_header<W: Write>(root: &Node, writer: &mut W) -> io::Result<usize> {
    writer.write_all(&MAGIC)?;
    let records = write_tree_block(root, writer)?;
    writer.write_all(&SEPARATOR)?;
    Ok(MAGIC.len() + records * RECORD_SIZE + SEPARATOR.len())
}

/// A container split back into its parts.
#[derive(Debug, Clone)]
pub struct Container<'a> {
    /// Tree rebuilt from the tree block
    pub tree: Node,
    /// Size of the tree block in bytes
    pub tree_block_len: usize,
    /// Packed payload, padding included
    pub payload: &'a [u8],
}

/// Split a container into tree and payload.
///
/// The payload bits are not expanded; only the structure is checked.
///
/// # Errors
/// - `FormatError::Truncated` if the buffer ends inside the header or tree block
/// - `FormatError::InvalidMagic` if the magic does not match
/// - `FormatError::MissingSeparator` if the separator bytes are not all zero
/// - tree block errors from [`parse_tree_block`]
pub fn parse_container(bytes: &[u8]) -> Result<Container<'_>> {
    let magic: [u8; 8] = bytes
        .get(..MAGIC.len())
        .and_then(|slice| slice.try_into().ok())
        .ok_or(FormatError::Truncated {
            required: MAGIC.len(),
            actual: bytes.len(),
        })?;
    if magic != MAGIC {
        return Err(FormatError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let body = &bytes[MAGIC.len()..];
    let (tree, tree_block_len) = parse_tree_block(body).map_err(|e| match e {
        crate::error::Error::Format(FormatError::Truncated { required, actual }) => {
            FormatError::Truncated {
                required: required + MAGIC.len(),
                actual: actual + MAGIC.len(),
            }
            .into()
        }
        other => other,
    })?;

    let separator_start = MAGIC.len() + tree_block_len;
    let payload_start = separator_start + SEPARATOR.len();
    let separator = bytes
        .get(separator_start..payload_start)
        .ok_or(FormatError::Truncated {
            required: payload_start,
            actual: bytes.len(),
        })?;
    if separator != SEPARATOR {
        return Err(FormatError::MissingSeparator {
            offset: separator_start,
        }
        .into());
    }

    Ok(Container {
        tree,
        tree_block_len,
        payload: &bytes[payload_start..],
    })
}
