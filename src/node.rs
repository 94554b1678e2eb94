use std::fmt;

use crate::types::Var;

/// Index of a node within its [`NodeStore`][crate::store::NodeStore].
///
/// Ids are assigned in allocation order, monotonically increasing within a
/// store, and are only meaningful for the store that produced them. Stores
/// are rebuilt wholesale between reorderings, so ids must never be compared
/// across rebuilds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The `0` terminal, allocated first in every store.
    pub const ZERO: NodeId = NodeId(0);
    /// The `1` terminal, allocated second in every store.
    pub const ONE: NodeId = NodeId(1);

    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the id as a table index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A diagram node.
///
/// A decision node represents a Shannon decomposition:
///
/// ```text
/// f = (¬var ∧ f_low) ∨ (var ∧ f_high)
/// ```
///
/// where `low` is selected when `var = 0` and `high` when `var = 1`. Nodes
/// are immutable after creation; decision nodes are only created through
/// [`NodeStore::make_node`][crate::store::NodeStore::make_node], which keeps
/// the diagram reduced.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    Zero,
    One,
    Decision { var: Var, low: NodeId, high: NodeId },
}

impl Node {
    /// The constant value of a terminal, `None` for decision nodes.
    pub fn value(&self) -> Option<bool> {
        match self {
            Node::Zero => Some(false),
            Node::One => Some(true),
            Node::Decision { .. } => None,
        }
    }

    /// The tested variable of a decision node, `None` for terminals.
    pub fn var(&self) -> Option<Var> {
        match self {
            Node::Decision { var, .. } => Some(*var),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Node::Decision { .. })
    }
}
