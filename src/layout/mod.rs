//! Layout of the normalized tree.
//!
//! This module turns a `TopicNode` tree into depth columns with stable ids
//! and reveal timing. Spatial placement inside a column is left to the
//! visual surface; connector geometry is computed afterwards from measured
//! boxes (see `connector`).

pub mod columns;
pub mod reveal;

pub use columns::{Column, ColumnLayout, ColumnLayoutConfig, LayoutSession, MindMapLayout};
pub use reveal::{REVEAL_STEP_MS, RevealScheduler};
