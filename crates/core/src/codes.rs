//! Code assignment from a finished tree.
//!
//! Codes are read off the root-to-leaf path: bit `d` of a code is the
//! decision taken at depth `d` (0 = left, 1 = right), so the root-level
//! decision is the least significant bit. A code's length is the leaf's depth.
//!
//! A tree that is a single leaf gives that byte a 0-bit code. Such inputs
//! encode to an empty payload.

use crate::error::{Result, TreeError};
use crate::tree::Node;

/// Longest code the 128-bit code register can hold.
pub const MAX_CODE_LENGTH: u32 = u128::BITS;

/// Code for one byte value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodeEntry {
    /// Path bits, root decision in bit 0
    pub code: u128,
    /// Number of valid bits in `code`
    pub length: u32,
}

/// Codes for all 256 byte values. Bytes absent from the tree have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    entries: [Option<CodeEntry>; 256],
}

impl CodeTable {
    /// Assign a code to every leaf of `root`.
    ///
    /// # Errors
    /// `TreeError::CodeLengthTooLong` if a leaf is deeper than `MAX_CODE_LENGTH`.
    pub fn from_tree(root: &Node) -> Result<Self> {
        let mut table = Self {
            entries: [None; 256],
        };
        table.assign(root, 0, 0)?;
        Ok(table)
    }

    fn assign(&mut self, node: &Node, depth: u32, code: u128) -> Result<()> {
        match node {
            Node::Leaf { byte, .. } => {
                self.entries[*byte as usize] = Some(CodeEntry {
                    code,
                    length: depth,
                });
                Ok(())
            }
            Node::Internal { left, right, .. } => {
                if depth >= MAX_CODE_LENGTH {
                    return Err(TreeError::CodeLengthTooLong {
                        length: depth + 1,
                        max: MAX_CODE_LENGTH,
                    }
                    .into());
                }
                self.assign(left, depth + 1, code)?;
                self.assign(right, depth + 1, code | (1u128 << depth))
            }
        }
    }

    /// Code for `byte`, `None` if the byte does not occur in the tree.
    pub fn get(&self, byte: u8) -> Option<CodeEntry> {
        self.entries[byte as usize]
    }

    /// Iterate `(byte, entry)` in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, CodeEntry)> + '_ {
        (0..=255u8).filter_map(move |byte| self.entries[byte as usize].map(|e| (byte, e)))
    }

    /// Number of bytes with a code.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
