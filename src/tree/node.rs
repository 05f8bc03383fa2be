//! Arena-backed node and edge storage
//!
//! Nodes live in one contiguous arena and are addressed by index.
//! Parent→child edges are owning relations expressed through the child
//! table; suffix links are plain non-owning indices into the same arena.
//!
//! Each edge label is an inclusive index range `[edge_start, edge_end]`
//! into the text, stored on the child node. Open leaves do not store a
//! concrete right endpoint: they carry the `Open` tag and resolve against
//! the tree's shared leaf end, so one tracker write lengthens every open
//! leaf at once.

use std::fmt;

/// Alphabet size used by [`crate::TreeConfig::default`]: the full byte range.
pub const DEFAULT_ALPHABET_SIZE: usize = 256;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root node, always slot 0 of the arena.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the root node.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Right endpoint of a node's incoming edge label (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeEnd {
    /// Resolves to the shared leaf end; grows with every phase.
    Open,
    /// Frozen endpoint: internal nodes and annotated leaves.
    Fixed(usize),
}

impl EdgeEnd {
    /// Concrete endpoint, resolving `Open` against the current leaf end.
    pub(crate) fn resolve(self, leaf_end: usize) -> usize {
        match self {
            EdgeEnd::Open => leaf_end,
            EdgeEnd::Fixed(end) => end,
        }
    }
}

/// One suffix tree node together with its incoming edge label.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Index into the text where the incoming edge label begins.
    /// Meaningless for the root, which has no incoming edge.
    pub edge_start: usize,

    /// Right endpoint of the incoming edge label.
    pub edge_end: EdgeEnd,

    /// Child table indexed by symbol; one slot per alphabet symbol.
    pub children: Box<[Option<NodeId>]>,

    /// Non-owning cross-link used only during construction to re-home
    /// the active point. Root carries no link.
    pub suffix_link: Option<NodeId>,

    /// Starting offset of the suffix this leaf spells; `None` for
    /// internal nodes and for leaves not yet annotated.
    pub suffix_index: Option<usize>,
}

impl Node {
    fn new(edge_start: usize, edge_end: EdgeEnd, alphabet_size: usize) -> Self {
        Self {
            edge_start,
            edge_end,
            children: vec![None; alphabet_size].into_boxed_slice(),
            suffix_link: Some(NodeId::ROOT),
            suffix_index: None,
        }
    }

    /// A node with no outgoing edges is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|slot| slot.is_none())
    }
}

/// Contiguous node storage. Slot 0 is always the root.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
    alphabet_size: usize,
}

impl NodeArena {
    /// Create an arena holding only the root.
    pub fn with_alphabet(alphabet_size: usize) -> Self {
        let mut root = Node::new(0, EdgeEnd::Fixed(0), alphabet_size);
        root.suffix_link = None;
        Self {
            nodes: vec![root],
            alphabet_size,
        }
    }

    /// Append a fresh node; its suffix link starts at the root.
    pub fn create(&mut self, edge_start: usize, edge_end: EdgeEnd) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(Node::new(edge_start, edge_end, self.alphabet_size));
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Child of `id` along the edge starting with `symbol`, if any.
    pub fn child(&self, id: NodeId, symbol: u8) -> Option<NodeId> {
        self.nodes[id.index()].children[symbol as usize]
    }

    /// Attach `child` under `id` for `symbol`. Overwriting an occupied
    /// slot is legal only during a split, where the displaced subtree is
    /// re-attached under the new internal node.
    pub fn set_child(&mut self, id: NodeId, symbol: u8, child: NodeId) {
        self.nodes[id.index()].children[symbol as usize] = Some(child);
    }

    /// Number of symbols on the incoming edge of `id`; 0 for the root.
    pub fn edge_length(&self, id: NodeId, leaf_end: usize) -> usize {
        if id.is_root() {
            return 0;
        }
        let node = &self.nodes[id.index()];
        node.edge_end.resolve(leaf_end) - node.edge_start + 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Iterate over `(symbol, child)` pairs in symbol order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.nodes[id.index()]
            .children
            .iter()
            .enumerate()
            .filter_map(|(symbol, slot)| slot.map(|child| (symbol as u8, child)))
    }
}
