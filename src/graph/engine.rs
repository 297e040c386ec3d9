//! PathGraph - arena owning the canonical nodes of one layout.
//!
//! Topology lives in petgraph's StableGraph; the node weights are the
//! canonical records themselves. Back-references are ids resolved through
//! `node_id_to_index`, so the tree stays a plain owned hierarchy.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use std::collections::HashMap;

use super::edge::TreeEdge;
use super::node::{CanonicalNode, NodeId};

/// Reasons a node cannot join the arena.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InsertError {
    #[error("{0} is already present")]
    DuplicateId(NodeId),

    #[error("parent {parent} of {child} is not present")]
    UnknownParent { parent: NodeId, child: NodeId },
}

/// Arena of canonical nodes with parent→child edges.
pub struct PathGraph {
    /// Node weights are the canonical records; edges carry no data.
    graph: StableGraph<CanonicalNode, (), Directed>,

    /// Map from session id to petgraph NodeIndex
    node_id_to_index: HashMap<NodeId, NodeIndex>,

    /// Ids in insertion (traversal) order
    order: Vec<NodeId>,
}

impl PathGraph {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_id_to_index: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create an arena with pre-allocated capacity.
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            graph: StableGraph::with_capacity(node_capacity, node_capacity.saturating_sub(1)),
            node_id_to_index: HashMap::with_capacity(node_capacity),
            order: Vec::with_capacity(node_capacity),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Insert a node. Its parent, if any, must already be present; the
    /// parent's child list is extended in insertion order.
    pub fn insert(&mut self, node: CanonicalNode) -> Result<NodeId, InsertError> {
        let id = node.id;
        if self.node_id_to_index.contains_key(&id) {
            return Err(InsertError::DuplicateId(id));
        }

        let parent_index = match node.parent_id {
            Some(parent) => Some(
                *self
                    .node_id_to_index
                    .get(&parent)
                    .ok_or(InsertError::UnknownParent { parent, child: id })?,
            ),
            None => None,
        };

        let index = self.graph.add_node(node);
        self.node_id_to_index.insert(id, index);
        self.order.push(id);

        if let Some(parent_index) = parent_index {
            self.graph.add_edge(parent_index, index, ());
            if let Some(parent) = self.graph.node_weight_mut(parent_index) {
                parent.children.push(id);
            }
        }

        Ok(id)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.node_id_to_index.clear();
        self.order.clear();
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Look up a node by id.
    pub fn get(&self, id: NodeId) -> Option<&CanonicalNode> {
        self.node_id_to_index
            .get(&id)
            .and_then(|&index| self.graph.node_weight(index))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node_id_to_index.contains_key(&id)
    }

    /// The node's parent, resolved through the incoming edge.
    pub fn parent_of(&self, id: NodeId) -> Option<&CanonicalNode> {
        let &index = self.node_id_to_index.get(&id)?;
        self.graph
            .neighbors_directed(index, Direction::Incoming)
            .next()
            .and_then(|parent| self.graph.node_weight(parent))
    }

    /// Children in source order.
    pub fn children_of(&self, id: NodeId) -> Vec<&CanonicalNode> {
        self.get(id)
            .map(|node| node.children.iter().filter_map(|&c| self.get(c)).collect())
            .unwrap_or_default()
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &CanonicalNode> + '_ {
        self.order.iter().filter_map(move |&id| self.get(id))
    }

    /// All parent→child edges in insertion order of the child.
    pub fn edges(&self) -> Vec<TreeEdge> {
        let mut edges: Vec<(usize, TreeEdge)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let parent = self.graph.node_weight(edge.source())?.id;
                let child = self.graph.node_weight(edge.target())?.id;
                Some((edge.id().index(), TreeEdge::new(parent, child)))
            })
            .collect();
        edges.sort_by_key(|&(index, _)| index);
        edges.into_iter().map(|(_, edge)| edge).collect()
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for PathGraph {
    fn default() -> Self {
        Self::new()
    }
}
