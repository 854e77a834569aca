//! huff-core: deterministic Huffman compression into a self-describing container
//!
//! This library turns an arbitrary byte stream into a container holding:
//! - A magic number
//! - The Huffman tree, serialized as pre-order 8-byte node records
//! - A zero separator
//! - The input re-expressed as LSB-first packed variable-length codes
//!
//! # Architecture
//!
//! - `source`: Re-openable input (the input is read once per pass)
//! - `frequency`: Byte frequency counting
//! - `tree`, `order`, `queue`, `builder`: Deterministic tree construction
//! - `codes`: Code assignment by tree walk
//! - `serialize`: Tree block records and text rendering
//! - `bitio`: LSB-first bit packing
//! - `container`: Container layout and inspection
//! - `encoder`, `pipeline`: The two-pass compression run
//! - `metrics`: Observable run statistics
//!
//! # Determinism
//!
//! The tree shape depends only on the byte counts. Ties between nodes of equal
//! frequency are broken by byte value (leaves) or creation order (internal
//! nodes), so identical input always produces a byte-identical container.

pub mod bitio;
pub mod builder;
pub mod codes;
pub mod container;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod order;
pub mod pipeline;
pub mod queue;
pub mod serialize;
pub mod source;
pub mod tree;

// Re-export commonly used types
pub use builder::{build_tree, TreeBuilder};
pub use codes::{CodeEntry, CodeTable};
pub use container::{parse_container, Container, MAGIC};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use metrics::Metrics;
pub use order::{CanonicalOrder, NodeOrder};
pub use pipeline::{compress, compress_file};
pub use source::{ByteSource, FileSource};
pub use tree::Node;
