//! Error types for the huff core.
//!
//! Every failure aborts processing of the current input. Nothing is recovered
//! locally; callers decide how to present the error.

use thiserror::Error;

/// Top-level error type for all operations in the core.
///
/// The two kinds a compression run can surface are `EmptyInput` and `Io`.
/// `Tree` and `Format` come from code assignment limits and from parsing an
/// existing container back for inspection.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream contained no bytes, so no tree can be built
    #[error("empty input: no bytes to build a code tree from")]
    EmptyInput,

    /// Reading the input or writing the container failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The finished tree cannot be turned into a code table
    #[error("huffman tree error: {0}")]
    Tree(#[from] TreeError),

    /// A container or tree block could not be parsed
    #[error("container format error: {0}")]
    Format(#[from] FormatError),
}

/// Code assignment errors.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A leaf sits deeper than the code register can hold
    #[error("code length {length} exceeds maximum {max}")]
    CodeLengthTooLong { length: u32, max: u32 },
}

/// Container and tree block parsing errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The first 8 bytes are not the container magic
    #[error("invalid magic: expected {expected:02x?}, got {actual:02x?}")]
    InvalidMagic { expected: [u8; 8], actual: [u8; 8] },

    /// The buffer ended in the middle of a record or header
    #[error("truncated input: need at least {required} bytes, got {actual}")]
    Truncated { required: usize, actual: usize },

    /// The 8 bytes after the tree block are not all zero
    #[error("missing separator after tree block at offset {offset}")]
    MissingSeparator { offset: usize },

    /// The tree block nests internal records deeper than allowed
    #[error("tree block nests deeper than {max} levels")]
    TreeTooDeep { max: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
