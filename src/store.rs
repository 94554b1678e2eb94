//! The node store: arena ownership and the hash-consing unique table.

use std::collections::HashMap;

use log::debug;

use crate::node::{Node, NodeId};
use crate::types::Var;

/// Owns every node of one diagram context.
///
/// Terminals are allocated at construction with the fixed ids
/// [`NodeId::ZERO`] and [`NodeId::ONE`]. Decision nodes are only created
/// through [`make_node`][NodeStore::make_node], which enforces the two
/// reduction invariants: no node with equal children ever exists, and at
/// most one node exists per `(var, low, high)` triple.
///
/// The store grows monotonically and is discarded wholesale when its
/// context is; individual nodes are never freed or mutated.
#[derive(Debug)]
pub struct NodeStore {
    nodes: Vec<Node>,
    unique: HashMap<(Var, NodeId, NodeId), NodeId>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Zero, Node::One],
            unique: HashMap::new(),
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Total live nodes, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total live decision nodes.
    pub fn num_decision_nodes(&self) -> usize {
        self.nodes.len() - 2
    }

    /// All nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(index, node)| (NodeId::new(index), node))
    }

    /// Returns the canonical node for `(¬var ∧ low) ∨ (var ∧ high)`.
    ///
    /// If the children coincide the common child is returned unchanged and
    /// no node is created. Otherwise the unique table is consulted; a fresh
    /// node with the next id is allocated only on a miss.
    ///
    /// Callers must ensure that decision children test variables of
    /// strictly greater rank than `var`; see
    /// [`Context::make_node`][crate::context::Context::make_node].
    pub fn make_node(&mut self, var: Var, low: NodeId, high: NodeId) -> NodeId {
        debug_assert!(low.index() < self.nodes.len(), "Low child {} does not exist", low);
        debug_assert!(high.index() < self.nodes.len(), "High child {} does not exist", high);

        if low == high {
            debug!("make_node(v = {}, low = {}, high = {}): redundant test", var, low, high);
            return low;
        }

        if let Some(&id) = self.unique.get(&(var, low, high)) {
            debug!("make_node: node {} for ({}, {}, {}) already exists", id, var, low, high);
            return id;
        }

        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::Decision { var, low, high });
        self.unique.insert((var, low, high), id);
        debug!("make_node: created {} = ({}, {}, {})", id, var, low, high);
        id
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}
