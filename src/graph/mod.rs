//! Canonical node model and the arena that owns it.
//!
//! Nodes are stored in petgraph's StableGraph with parent→child edges.
//! Everything outside this module refers to nodes by `NodeId` only.

mod edge;
mod engine;
mod node;
mod resources;

pub use edge::TreeEdge;
pub use engine::{InsertError, PathGraph};
pub use node::{CanonicalNode, NodeId, ParseNodeIdError};
pub use resources::{Reference, ResourceKind, Resources, TitledLink};
