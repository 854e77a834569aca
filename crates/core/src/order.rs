//! Ranking of candidate nodes during tree construction.
//!
//! The rank decides which two nodes merge next and which becomes the left
//! child, so it fixes the exact tree shape and therefore every output bit.
//! The comparator is a standalone policy so it can be swapped and tested
//! without building trees.

use std::cmp::Ordering;

use crate::tree::Node;

/// A strict total order over candidate nodes. Lower ranks merge first.
pub trait NodeOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering;
}

/// The canonical four-level rank:
///
/// 1. frequency, ascending
/// 2. two leaves: byte value, ascending
/// 3. two internal nodes: age, ascending
/// 4. a leaf ranks below an internal node of equal frequency
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalOrder;

impl NodeOrder for CanonicalOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        a.frequency()
            .cmp(&b.frequency())
            .then_with(|| match (a, b) {
                (Node::Leaf { byte: x, .. }, Node::Leaf { byte: y, .. }) => x.cmp(y),
                (Node::Internal { age: x, .. }, Node::Internal { age: y, .. }) => x.cmp(y),
                (Node::Leaf { .. }, Node::Internal { .. }) => Ordering::Less,
                (Node::Internal { .. }, Node::Leaf { .. }) => Ordering::Greater,
            })
    }
}
