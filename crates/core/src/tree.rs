//! Huffman tree construction and code derivation.
//!
//! The tree lives in an arena: nodes are addressed by [`NodeId`], each node
//! stores its child and parent ids, and ownership is simply membership of
//! the arena. Parent links are only used to derive codes leaf-to-root.
//!
//! # Construction
//!
//! A min-priority queue is seeded with one leaf per distinct symbol. While
//! more than one node is queued, the two lightest are removed, the first
//! becomes the left child and the second the right child of a new branch,
//! and the branch is queued. The last node standing is the root.
//!
//! Ties are broken by arena index: leaves are allocated in ascending symbol
//! order and every branch gets the next free index. That makes builds
//! repeatable here, but the bitstream format does not depend on it and
//! other encoders may break ties differently.
//!
//! # Code convention
//!
//! A `1` bit means "left child", a `0` bit means "right child". The decoder
//! depends on this polarity.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};
use crate::frequency::FrequencyModel;

/// Index of a node in a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One arena slot: a leaf (symbol, no children) or a branch (two children,
/// no symbol).
#[derive(Debug, Clone, Default)]
pub struct Node {
    symbol: Option<u8>,
    weight: u64,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    pub fn symbol(&self) -> Option<u8> {
        self.symbol
    }

    /// Aggregate frequency. Always 0 for trees rebuilt from a bitstream.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Both child slots are filled.
    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// A Huffman tree held in an arena.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    /// Leaves produced by the merge process, in allocation order
    leaves: Vec<NodeId>,
    /// Code table as of the last build or reconstruction
    codes: CodeTable,
}

impl HuffmanTree {
    /// Build the tree for a frequency model.
    ///
    /// A model with one distinct symbol yields a single-leaf root with no
    /// merge step.
    pub fn build(freq: &FrequencyModel) -> Result<Self> {
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * freq.distinct());
        let mut heap = BinaryHeap::new();

        for (symbol, count) in freq.iter() {
            let id = NodeId(nodes.len());
            nodes.push(Node {
                symbol: Some(symbol),
                weight: count,
                ..Node::default()
            });
            heap.push(Reverse((count, id)));
        }
        let leaves: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();

        while heap.len() > 1 {
            let (Some(Reverse((wa, a))), Some(Reverse((wb, b)))) = (heap.pop(), heap.pop()) else {
                break;
            };

            let branch = NodeId(nodes.len());
            let weight = wa + wb;
            nodes.push(Node {
                symbol: None,
                weight,
                parent: None,
                left: Some(a),
                right: Some(b),
            });
            nodes[a.0].parent = Some(branch);
            nodes[b.0].parent = Some(branch);

            heap.push(Reverse((weight, branch)));
        }

        let Reverse((_, root)) = heap.pop().ok_or(Error::EmptyInput)?;

        let mut tree = Self {
            nodes,
            root,
            leaves,
            codes: CodeTable::new(),
        };
        tree.codes = tree.derive_codes();
        log::debug!(
            "built huffman tree: {} leaves, {} nodes, root weight {}",
            tree.leaves.len(),
            tree.nodes.len(),
            tree.root_weight()
        );
        Ok(tree)
    }

    /// Derive the code of every merge-produced leaf.
    ///
    /// Walks parent links leaf to root, one bit per edge (1 = left child,
    /// 0 = right child), then reverses so codes read root to leaf. A
    /// single-leaf tree gives its symbol the empty code.
    ///
    /// With at most 256 leaves no code is longer than 255 bits.
    pub fn derive_codes(&self) -> CodeTable {
        let mut table = CodeTable::new();

        for &leaf in &self.leaves {
            let Some(symbol) = self.nodes[leaf.0].symbol else {
                continue;
            };

            let mut bits = Vec::new();
            let mut current = leaf;
            while let Some(parent) = self.nodes[current.0].parent {
                bits.push(self.nodes[parent.0].left == Some(current));
                current = parent;
            }
            bits.reverse();

            table.insert(symbol, Code::from_bits(bits));
        }

        table
    }

    /// Code table computed when the tree was built, or when a decoded tree
    /// received its leaf symbols.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    /// Recompute the cached code table after leaf symbols change.
    pub(crate) fn refresh_codes(&mut self) {
        self.codes = self.derive_codes();
    }

    /// A tree holding one blank root, for reconstruction from a bitstream.
    pub(crate) fn blank() -> Self {
        Self {
            nodes: vec![Node::default()],
            root: NodeId(0),
            leaves: Vec::new(),
            codes: CodeTable::new(),
        }
    }

    /// Attach a fresh child to `parent`: left if empty, else right.
    pub(crate) fn attach_child(&mut self, parent: NodeId) -> NodeId {
        let child = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            ..Node::default()
        });
        let slot = &mut self.nodes[parent.0];
        if slot.left.is_none() {
            slot.left = Some(child);
        } else {
            slot.right = Some(child);
        }
        child
    }

    pub(crate) fn set_symbol(&mut self, id: NodeId, symbol: u8) {
        self.nodes[id.0].symbol = Some(symbol);
    }

    /// Register a reconstructed leaf so [`derive_codes`](Self::derive_codes) sees it.
    pub(crate) fn record_leaf(&mut self, id: NodeId) {
        self.leaves.push(id);
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Frequency of the root (the input length for built trees).
    pub fn root_weight(&self) -> u64 {
        self.nodes[self.root.0].weight
    }

    /// Number of arena nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|&id| self.node(id).is_leaf()).count()
    }

    /// The root is itself a leaf (one distinct symbol).
    pub fn is_degenerate(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Node ids in pre-order (node, left subtree, right subtree).
    pub fn preorder(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = &self.nodes[id.0];
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
            Some(id)
        })
    }

    /// Draw the tree as indented text, left subtree above right.
    ///
    /// ```text
    /// └── 4
    ///     ├── 'b',1
    ///     └── 'a',3
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, "", true, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, prefix: &str, is_tail: bool, out: &mut String) {
        let node = &self.nodes[id.0];
        let connector = if is_tail { "└── " } else { "├── " };
        let label = match node.symbol {
            Some(symbol) => format!("{},{}", symbol_label(symbol), node.weight),
            None => node.weight.to_string(),
        };
        out.push_str(&format!("{prefix}{connector}{label}\n"));

        let child_prefix = format!("{prefix}{}", if is_tail { "    " } else { "│   " });
        if let Some(left) = node.left {
            self.render_node(left, &child_prefix, false, out);
        }
        if let Some(right) = node.right {
            self.render_node(right, &child_prefix, true, out);
        }
    }
}

fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("{symbol:#04x}")
    }
}
