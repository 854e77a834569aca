//! Greedy Huffman tree construction.
//!
//! Starting from one leaf per byte value that occurs, the two lowest-ranked
//! candidates are repeatedly merged until a single root remains. The first
//! node removed becomes the left child. Every merge takes the next value of
//! the builder's age counter, which starts at 0 for each build.
//!
//! # Determinism
//!
//! The rank (see [`crate::order::CanonicalOrder`]) is a strict total order
//! over the candidates of a build: leaf bytes are unique and ages are unique,
//! so no two candidates ever compare equal. Identical frequency tables always
//! produce identical trees.

use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::order::{CanonicalOrder, NodeOrder};
use crate::queue::CandidateQueue;
use crate::tree::Node;

/// Builds code trees using a ranking policy.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder<O = CanonicalOrder> {
    order: O,
    next_age: u64,
}

impl TreeBuilder<CanonicalOrder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: NodeOrder + Clone> TreeBuilder<O> {
    /// Create a builder that ranks candidates with `order`.
    pub fn with_order(order: O) -> Self {
        Self { order, next_age: 0 }
    }

    /// Build the tree for `table`.
    ///
    /// With a single distinct byte the root is that leaf and no merge happens.
    ///
    /// # Errors
    /// `Error::EmptyInput` if every count is zero.
    #[instrument(level = "debug", skip_all, fields(distinct = table.distinct()))]
    pub fn build(&mut self, table: &FrequencyTable) -> Result<Node> {
        self.next_age = 0;
        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut queue = CandidateQueue::with_capacity(self.order.clone(), table.distinct());
        queue.extend(table.present().map(|(byte, count)| Node::leaf(byte, count)));

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                break;
            };
            let age = self.next_age;
            self.next_age += 1;

            trace!(
                age,
                left = left.frequency(),
                right = right.frequency(),
                "merging candidates"
            );
            queue.push(Node::merge(left, right, age));
        }

        let root = queue.pop().ok_or(Error::EmptyInput)?;
        debug!(
            merges = self.next_age,
            nodes = root.node_count(),
            height = root.height(),
            "tree built"
        );
        Ok(root)
    }

    /// Number of merges performed by the last build.
    pub fn merges(&self) -> u64 {
        self.next_age
    }
}

/// Build a tree with the canonical ranking.
pub fn build_tree(table: &FrequencyTable) -> Result<Node> {
    TreeBuilder::new().build(table)
}
