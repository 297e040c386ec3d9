//! Parent→child edge.
//!
//! In a tree every non-root node has exactly one incoming edge, so an edge
//! is identified by its child.

use std::fmt;

use super::node::NodeId;

/// A directed parent→child link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeEdge {
    pub parent: NodeId,
    pub child: NodeId,
}

impl TreeEdge {
    #[inline]
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self { parent, child }
    }
}

impl fmt::Display for TreeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.parent, self.child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_display() {
        let edge = TreeEdge::new(NodeId(1), NodeId(4));
        assert_eq!(format!("{}", edge), "node-1 -> node-4");
    }
}
