//! Spatial indexing for hit testing.
//!
//! This module provides an R-tree over measured node boxes so a pointer
//! position can be resolved to the clickable node under it.

mod rtree;

pub use rtree::{HitIndex, NodeBox};
