//! Node type and related structures.
//!
//! A canonical node is the normalized, internally consistent record the
//! layout, connector renderer and detail modal work with. Each node has:
//! - A session-unique identifier, assigned once during layout
//! - A back-reference to its parent by id (never a pointer)
//! - Its children as ordered ids
//! - Reveal timing from the scheduler

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::resources::Resources;

/// Prefix used when a node id is rendered as a DOM element id.
const DOM_ID_PREFIX: &str = "node-";

/// Session-unique node identifier.
///
/// Ids start at 1 and follow breadth-first traversal order. They are
/// rendered as `node-<n>` so they can double as DOM element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DOM_ID_PREFIX}{}", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

/// Error returned when a string is not of the form `node-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a node id: {0:?}")]
pub struct ParseNodeIdError(pub String);

impl FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(DOM_ID_PREFIX)
            .and_then(|raw| raw.parse::<u32>().ok())
            .map(NodeId)
            .ok_or_else(|| ParseNodeIdError(s.to_string()))
    }
}

/// A normalized node placed in the layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalNode {
    pub id: NodeId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Structural group header; never a detail target.
    pub is_hub: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
    /// Ordered child ids.
    pub children: Vec<NodeId>,
    /// Column index (root = 0).
    pub depth: u32,
    pub display_delay_ms: u32,
}

impl CanonicalNode {
    /// Whether the node may be opened in the detail modal.
    #[inline]
    pub fn is_clickable(&self) -> bool {
        !self.is_hub
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
