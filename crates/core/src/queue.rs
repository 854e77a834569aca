//! Binary min-heap of candidate nodes ranked by a `NodeOrder`.
//!
//! `std::collections::BinaryHeap` needs `Ord` on the element type, which would
//! bake one ranking into `Node`. This heap takes the ranking as a value instead.

use std::cmp::Ordering;

use crate::order::NodeOrder;
use crate::tree::Node;

/// Min-heap over `Node`s. The root (index 0) is always the lowest-ranked node.
///
/// # Invariants
/// - For every `i > 0`: `order.compare(nodes[(i - 1) / 2], nodes[i]) != Greater`
#[derive(Debug)]
pub struct CandidateQueue<O> {
    nodes: Vec<Node>,
    order: O,
}

impl<O: NodeOrder> CandidateQueue<O> {
    pub fn with_capacity(order: O, capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    /// Remove and return the lowest-ranked node.
    pub fn pop(&mut self) -> Option<Node> {
        if self.is_empty() {
            return None;
        }
        let last = self.nodes.len() - 1;
        self.nodes.swap(0, last);
        let min = self.nodes.pop();
        if !self.is_empty() {
            self.sift_down(0);
        }
        min
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.order.compare(&self.nodes[i], &self.nodes[j]) == Ordering::Less
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.nodes.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;

            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.nodes.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<O: NodeOrder> Extend<Node> for CandidateQueue<O> {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        for node in iter {
            self.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::CanonicalOrder;

    /// Orders purely by frequency, descending. Only used to prove the heap
    /// follows whatever policy it is given.
    struct HeaviestFirst;

    impl NodeOrder for HeaviestFirst {
        fn compare(&self, a: &Node, b: &Node) -> Ordering {
            b.frequency().cmp(&a.frequency())
        }
    }

    #[test]
    fn test_pops_in_rank_order() {
        let mut queue = CandidateQueue::with_capacity(CanonicalOrder, 5);
        for (byte, freq) in [(b'd', 4), (b'a', 1), (b'c', 1), (b'b', 9), (b'e', 1)] {
            queue.push(Node::leaf(byte, freq));
        }
        assert_eq!(queue.len(), 5);

        let order: Vec<u8> = std::iter::from_fn(|| queue.pop())
            .filter_map(|n| n.byte())
            .collect();
        assert_eq!(order, b"acedb");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty() {
        let mut queue = CandidateQueue::with_capacity(CanonicalOrder, 0);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_custom_order_is_respected() {
        let mut queue = CandidateQueue::with_capacity(HeaviestFirst, 3);
        queue.extend([1u64, 5, 3].into_iter().map(|f| Node::leaf(0, f)));

        let freqs: Vec<u64> = std::iter::from_fn(|| queue.pop())
            .map(|n| n.frequency())
            .collect();
        assert_eq!(freqs, vec![5, 3, 1]);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = CandidateQueue::with_capacity(CanonicalOrder, 8);
        queue.extend((0..=7u8).rev().map(|b| Node::leaf(b, 1)));

        let a = queue.pop().unwrap();
        let b = queue.pop().unwrap();
        assert_eq!((a.byte(), b.byte()), (Some(0), Some(1)));
        queue.push(Node::merge(a, b, 0));

        // Remaining frequency-1 leaves still come before the merged node
        let next: Vec<Option<u8>> = (0..6).map(|_| queue.pop().unwrap().byte()).collect();
        assert_eq!(next, vec![Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);
        assert_eq!(queue.pop().unwrap().age(), Some(0));
    }
}
