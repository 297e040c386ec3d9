//! Box measurement capability.
//!
//! The connector renderer never touches the visual surface directly; it asks
//! a `BoxMeasure` for node boxes. The browser implementation reads
//! `getBoundingClientRect`; `StaticBoxes` holds boxes measured elsewhere
//! (handed in from JS, or synthetic in tests).

use std::collections::HashMap;

use super::geometry::{Extent, Rect};
use crate::graph::NodeId;

/// Source of on-screen node boxes, relative to the layout container origin.
pub trait BoxMeasure {
    /// Current box of a rendered node, or `None` if it is not on the surface.
    fn measure(&self, id: NodeId) -> Option<Rect>;

    /// Full scrollable extent of the content.
    fn content_extent(&self) -> Extent;
}

/// Boxes known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticBoxes {
    boxes: HashMap<NodeId, Rect>,
    extent: Extent,
}

/// Values per box in the flat wire format: `[id, left, top, width, height]`.
pub const FLAT_BOX_STRIDE: usize = 5;

impl StaticBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extent(extent: Extent) -> Self {
        Self {
            boxes: HashMap::new(),
            extent,
        }
    }

    /// Parse `[id0, left0, top0, w0, h0, id1, ...]`. A trailing partial
    /// record and invalid boxes are ignored; returns the boxes and the
    /// number of records skipped.
    pub fn from_flat(values: &[f64], extent: Extent) -> (Self, usize) {
        let mut boxes = Self::with_extent(extent);
        let mut skipped = 0;
        for record in values.chunks(FLAT_BOX_STRIDE) {
            let [id, left, top, width, height] = record else {
                skipped += 1;
                continue;
            };
            let rect = Rect::new(*left, *top, *width, *height);
            if !id.is_finite() || *id < 1.0 || id.fract() != 0.0 || *id > u32::MAX as f64 || !rect.is_valid() {
                skipped += 1;
                continue;
            }
            boxes.insert(NodeId(*id as u32), rect);
        }
        (boxes, skipped)
    }

    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.boxes.insert(id, rect);
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Rect> {
        self.boxes.remove(&id)
    }

    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    /// All boxes, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.boxes.iter().map(|(&id, &rect)| (id, rect))
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl BoxMeasure for StaticBoxes {
    fn measure(&self, id: NodeId) -> Option<Rect> {
        self.boxes.get(&id).copied()
    }

    fn content_extent(&self) -> Extent {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat() {
        let values = [1.0, 0.0, 0.0, 100.0, 40.0, 2.0, 200.0, 0.0, 100.0, 40.0];
        let (boxes, skipped) = StaticBoxes::from_flat(&values, Extent::new(300.0, 40.0));
        assert_eq!(skipped, 0);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes.measure(NodeId(2)), Some(Rect::new(200.0, 0.0, 100.0, 40.0)));
        assert_eq!(boxes.content_extent(), Extent::new(300.0, 40.0));
    }

    #[test]
    fn test_from_flat_skips_bad_records() {
        let values = [
            1.5, 0.0, 0.0, 1.0, 1.0, // fractional id
            0.0, 0.0, 0.0, 1.0, 1.0, // id 0 is never issued
            3.0, 0.0, 0.0, -1.0, 1.0, // negative width
            4.0, 0.0, 0.0, 1.0, 1.0, // ok
            5.0, 1.0, // truncated
        ];
        let (boxes, skipped) = StaticBoxes::from_flat(&values, Extent::default());
        assert_eq!(skipped, 4);
        assert_eq!(boxes.len(), 1);
        assert!(boxes.measure(NodeId(4)).is_some());
    }

    #[test]
    fn test_unknown_node_is_none() {
        let boxes = StaticBoxes::new();
        assert!(boxes.measure(NodeId(1)).is_none());
        assert!(boxes.is_empty());
    }
}
