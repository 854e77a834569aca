//! Code tree nodes.
//!
//! The tree is owned top-down: every internal node owns exactly two boxed
//! children and no node has more than one parent.

/// A node of the code tree.
///
/// # Invariants
/// - An internal node's `frequency` equals the sum of its children's
/// - `age` is unique among the internal nodes of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single byte value and its occurrence count.
    Leaf { byte: u8, frequency: u64 },

    /// The merge of two lower-ranked nodes.
    Internal {
        frequency: u64,
        /// Creation order within the build, used only to break ties
        age: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(byte: u8, frequency: u64) -> Self {
        Node::Leaf { byte, frequency }
    }

    /// Merge two nodes into a new internal node; `left` is the lower-ranked one.
    pub fn merge(left: Node, right: Node, age: u64) -> Self {
        Node::Internal {
            frequency: left.frequency() + right.frequency(),
            age,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Byte value of a leaf, `None` for internal nodes.
    pub fn byte(&self) -> Option<u8> {
        match self {
            Node::Leaf { byte, .. } => Some(*byte),
            Node::Internal { .. } => None,
        }
    }

    /// Merge age of an internal node, `None` for leaves.
    pub fn age(&self) -> Option<u64> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { age, .. } => Some(*age),
        }
    }

    /// Both children of an internal node.
    pub fn children(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    /// Leaves in pre-order as `(byte, frequency, depth)`.
    pub fn leaves(&self) -> Vec<(u8, u64, u32)> {
        let mut out = Vec::new();
        self.collect_leaves(0, &mut out);
        out
    }

    fn collect_leaves(&self, depth: u32, out: &mut Vec<(u8, u64, u32)>) {
        match self {
            Node::Leaf { byte, frequency } => out.push((*byte, *frequency, depth)),
            Node::Internal { left, right, .. } => {
                left.collect_leaves(depth + 1, out);
                right.collect_leaves(depth + 1, out);
            }
        }
    }

    /// Follow a root-to-leaf path where bit `d` of `code` is the decision at depth `d`
    /// (0 = left, 1 = right). Returns the node reached after `length` steps.
    pub fn walk(&self, code: u128, length: u32) -> Option<&Node> {
        let mut node = self;
        for depth in 0..length {
            let (left, right) = node.children()?;
            node = if (code >> depth) & 1 == 1 { right } else { left };
        }
        Some(node)
    }
}
