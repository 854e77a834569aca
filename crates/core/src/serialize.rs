//! Tree block serialization.
//!
//! The tree is written in pre-order (node, left subtree, right subtree), one
//! fixed-size record per node, internal nodes included.
//!
//! # Record Format
//!
//! Each record is a `u64` written little-endian:
//!
//! ```text
//!  63        56 55                                    1   0
//! +------------+---------------------------------------+---+
//! | byte value |        frequency mod 2^55             | L |
//! +------------+---------------------------------------+---+
//! ```
//!
//! - `L`: 1 for a leaf, 0 for an internal node
//! - byte value: the leaf's byte, 0 for internal nodes
//!
//! Frequencies of 2^55 or more silently lose their high bits.

use std::fmt;
use std::io::{self, Write};

use crate::error::{FormatError, Result};
use crate::tree::Node;

/// Size of one serialized node record in bytes.
pub const RECORD_SIZE: usize = 8;

/// Mask of the frequency bits kept in a record.
pub const FREQUENCY_MASK: u64 = (1 << 55) - 1;

/// Nesting limit when parsing a tree block.
pub const MAX_PARSE_DEPTH: usize = 256;

/// The decoded content of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializedNode {
    pub is_leaf: bool,
    /// Frequency truncated to 55 bits
    pub frequency: u64,
    /// Byte value for leaves, 0 for internal nodes
    pub byte: u8,
}

impl SerializedNode {
    pub fn from_node(node: &Node) -> Self {
        Self {
            is_leaf: node.is_leaf(),
            frequency: node.frequency() & FREQUENCY_MASK,
            byte: node.byte().unwrap_or(0),
        }
    }

    /// Pack into the 64-bit record value.
    pub fn to_u64(self) -> u64 {
        let mut word = (self.frequency & FREQUENCY_MASK) << 1;
        if self.is_leaf {
            word |= 1;
            word |= (self.byte as u64) << 56;
        }
        word
    }

    pub fn from_u64(word: u64) -> Self {
        let is_leaf = word & 1 == 1;
        Self {
            is_leaf,
            frequency: (word >> 1) & FREQUENCY_MASK,
            byte: if is_leaf { (word >> 56) as u8 } else { 0 },
        }
    }

    pub fn to_bytes(self) -> [u8; RECORD_SIZE] {
        self.to_u64().to_le_bytes()
    }

    pub fn from_bytes(bytes: [u8; RECORD_SIZE]) -> Self {
        Self::from_u64(u64::from_le_bytes(bytes))
    }
}

/// Render one node as its 8-byte record.
pub fn encode_node(node: &Node) -> [u8; RECORD_SIZE] {
    SerializedNode::from_node(node).to_bytes()
}

/// Nodes of `root` in pre-order.
pub fn preorder(root: &Node) -> Vec<&Node> {
    let mut out = Vec::with_capacity(root.node_count());
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        if let Some((left, right)) = node.children() {
            stack.push(right);
            stack.push(left);
        }
    }
    out
}

/// Write the tree block for `root` and return the number of records written.
pub fn write_tree_block<W: Write>(root: &Node, writer: &mut W) -> io::Result<usize> {
    let nodes = preorder(root);
    for node in &nodes {
        writer.write_all(&encode_node(node))?;
    }
    Ok(nodes.len())
}

/// The tree block for `root` as a byte vector.
pub fn tree_block(root: &Node) -> Vec<u8> {
    preorder(root).into_iter().flat_map(encode_node).collect()
}

/// Human-readable pre-order rendering: `*<byte>:<frequency> ` for leaves,
/// `<frequency> ` for internal nodes.
pub struct TreeText<'a>(pub &'a Node);

impl fmt::Display for TreeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in preorder(self.0) {
            match node {
                Node::Leaf { byte, frequency } => write!(f, "*{}:{} ", byte, frequency)?,
                Node::Internal { frequency, .. } => write!(f, "{} ", frequency)?,
            }
        }
        Ok(())
    }
}

/// Parse one tree from the start of `bytes`.
///
/// Returns the tree and the number of bytes consumed. Internal nodes get
/// ages in the order their records complete; ages are not stored.
///
/// # Errors
/// - `FormatError::Truncated` if the records end before the tree is complete
/// - `FormatError::TreeTooDeep` if internal records nest deeper than `MAX_PARSE_DEPTH`
pub fn parse_tree_block(bytes: &[u8]) -> Result<(Node, usize)> {
    let mut parser = TreeParser {
        bytes,
        offset: 0,
        next_age: 0,
    };
    let root = parser.parse_node(0)?;
    Ok((root, parser.offset))
}

struct TreeParser<'a> {
    bytes: &'a [u8],
    offset: usize,
    next_age: u64,
}

impl TreeParser<'_> {
    fn next_record(&mut self) -> Result<SerializedNode> {
        let end = self.offset + RECORD_SIZE;
        let record: [u8; RECORD_SIZE] = self
            .bytes
            .get(self.offset..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(FormatError::Truncated {
                required: end,
                actual: self.bytes.len(),
            })?;
        self.offset = end;
        Ok(SerializedNode::from_bytes(record))
    }

    fn parse_node(&mut self, depth: usize) -> Result<Node> {
        let record = self.next_record()?;
        if record.is_leaf {
            return Ok(Node::leaf(record.byte, record.frequency));
        }
        if depth >= MAX_PARSE_DEPTH {
            return Err(FormatError::TreeTooDeep {
                max: MAX_PARSE_DEPTH,
            }
            .into());
        }

        let left = self.parse_node(depth + 1)?;
        let right = self.parse_node(depth + 1)?;
        let age = self.next_age;
        self.next_age += 1;

        // Keep the stored (possibly truncated) frequency rather than the sum
        Ok(Node::Internal {
            frequency: record.frequency,
            age,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}
