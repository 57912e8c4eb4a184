//! Huffman prefix tree construction and code generation
//!
//! The tree is an arena: nodes live in one `Vec` and refer to their
//! children by [`NodeId`]. Leaves are created first, in the order the
//! frequency table yields its tokens, followed by internal nodes in the
//! order they are combined. Construction and traversal use explicit stacks
//! and a binary heap, so depth is bounded by memory rather than by the call
//! stack.
//!
//! Ties between equal weights are broken by node creation order. The
//! resulting code is a valid minimum-redundancy code but not a canonical
//! Huffman code.

use super::bits::BitString;
use super::code_table::CodeTable;
use crate::error::Result;
use crate::hash_map::ProbeTable;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node in a [`PrefixTree`]
pub type NodeId = usize;

/// Node of the prefix tree
///
/// Every node is either a leaf or has exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixNode {
    /// Token with its frequency
    Leaf {
        /// Token text
        token: String,
        /// Frequency of the token
        weight: usize,
    },
    /// Combination of two nodes
    Internal {
        /// Sum of the children's weights
        weight: usize,
        /// Child on the `0` edge
        left: NodeId,
        /// Child on the `1` edge
        right: NodeId,
    },
}

impl PrefixNode {
    /// Weight of the node
    #[inline]
    pub fn weight(&self) -> usize {
        match self {
            PrefixNode::Leaf { weight, .. } | PrefixNode::Internal { weight, .. } => *weight,
        }
    }

    /// Check whether this is a leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, PrefixNode::Leaf { .. })
    }

    /// Token of a leaf
    pub fn token(&self) -> Option<&str> {
        match self {
            PrefixNode::Leaf { token, .. } => Some(token),
            PrefixNode::Internal { .. } => None,
        }
    }

    /// `(left, right)` children of an internal node
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            PrefixNode::Internal { left, right, .. } => Some((*left, *right)),
            PrefixNode::Leaf { .. } => None,
        }
    }
}

/// Arena-backed binary prefix tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixTree {
    nodes: Vec<PrefixNode>,
    root: Option<NodeId>,
}

impl PrefixTree {
    /// Root node id, `None` for an empty tree
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Root node
    pub fn root_node(&self) -> Option<&PrefixNode> {
        self.root.and_then(|id| self.node(id))
    }

    /// Node by id
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&PrefixNode> {
        self.nodes.get(id)
    }

    /// Check whether the tree has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves (distinct tokens)
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of internal nodes
    pub fn internal_count(&self) -> usize {
        self.node_count() - self.leaf_count()
    }

    /// Weight of the root, 0 for an empty tree
    pub fn root_weight(&self) -> usize {
        self.root_node().map_or(0, PrefixNode::weight)
    }

    /// Iterate over `(token, weight)` of every leaf in creation order
    pub fn leaves(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            PrefixNode::Leaf { token, weight } => Some((token.as_str(), *weight)),
            PrefixNode::Internal { .. } => None,
        })
    }

    /// `(token, depth)` of every leaf, left to right
    pub fn leaf_depths(&self) -> Vec<(&str, usize)> {
        let mut depths = Vec::with_capacity(self.nodes.len() / 2 + 1);
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 0)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Some(PrefixNode::Leaf { token, .. }) => depths.push((token.as_str(), depth)),
                Some(PrefixNode::Internal { left, right, .. }) => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
                None => {}
            }
        }

        depths
    }
}

/// Builds a [`PrefixTree`] from token frequencies
pub struct TreeBuilder;

impl TreeBuilder {
    /// Build the tree for a frequency table
    pub fn build(frequencies: &ProbeTable<String, usize>) -> PrefixTree {
        Self::from_weights(
            frequencies
                .iter()
                .map(|(token, &weight)| (token.clone(), weight)),
        )
    }

    /// Build the tree from `(token, weight)` pairs
    ///
    /// The two lightest nodes are repeatedly combined, the first removed
    /// becoming the left child. A single token yields a tree whose root is
    /// that leaf; no tokens yield an empty tree.
    pub fn from_weights<I>(weights: I) -> PrefixTree
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let mut nodes: Vec<PrefixNode> = weights
            .into_iter()
            .map(|(token, weight)| PrefixNode::Leaf { token, weight })
            .collect();

        let mut heap: BinaryHeap<Reverse<(usize, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight(), id)))
            .collect();

        let leaf_count = nodes.len();
        nodes.reserve(leaf_count.saturating_sub(1));

        let mut root = None;
        while let Some(Reverse((first_weight, first))) = heap.pop() {
            let Some(Reverse((second_weight, second))) = heap.pop() else {
                root = Some(first);
                break;
            };

            let weight = first_weight.saturating_add(second_weight);
            let id = nodes.len();
            nodes.push(PrefixNode::Internal {
                weight,
                left: first,
                right: second,
            });
            heap.push(Reverse((weight, id)));
        }

        let tree = PrefixTree { nodes, root };
        log::debug!(
            "Built prefix tree: {} leaves, {} internal nodes, root weight {}",
            leaf_count,
            tree.internal_count(),
            tree.root_weight()
        );
        tree
    }
}

/// Derives the code table of a [`PrefixTree`]
pub struct CodeGenerator;

impl CodeGenerator {
    /// Bind every leaf token to its root-to-leaf path
    ///
    /// Left edges append `0`, right edges append `1`. Entries are inserted
    /// left to right into a table of `capacity` slots. A tree whose root is
    /// a leaf binds that token to the empty code.
    pub fn generate(tree: &PrefixTree, capacity: usize) -> Result<CodeTable> {
        let mut codes = CodeTable::with_capacity(capacity)?;
        let mut stack: Vec<(NodeId, BitString)> = tree
            .root()
            .map(|id| (id, BitString::new()))
            .into_iter()
            .collect();

        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Some(PrefixNode::Leaf { token, .. }) => {
                    log::trace!("code {:?} -> {}", token, path);
                    codes.insert(token.clone(), path)?;
                }
                Some(PrefixNode::Internal { left, right, .. }) => {
                    stack.push((*right, path.with_bit(true)));
                    stack.push((*left, path.with_bit(false)));
                }
                None => {}
            }
        }

        Ok(codes)
    }
}
