//! R-tree hit index over measured node boxes, using the rstar crate.
//!
//! Only clickable (non-hub) nodes are indexed, so a hub can never be
//! resolved as a click target.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::connector::{Point, Rect};
use crate::graph::NodeId;

/// A node box in the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    pub rect: Rect,
}

impl NodeBox {
    pub fn new(id: NodeId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

impl RTreeObject for NodeBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.left, self.rect.top],
            [self.rect.right(), self.rect.bottom()],
        )
    }
}

impl PointDistance for NodeBox {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = (self.rect.left - point[0]).max(0.0).max(point[0] - self.rect.right());
        let dy = (self.rect.top - point[1]).max(0.0).max(point[1] - self.rect.bottom());
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.rect.contains(Point::new(point[0], point[1]))
    }
}

/// Spatial index for click resolution.
pub struct HitIndex {
    tree: RTree<NodeBox>,
}

impl HitIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Insert a node box.
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.tree.insert(NodeBox::new(id, rect));
    }

    /// The node whose box contains the point. Overlaps resolve to the
    /// smallest id, i.e. the earliest in traversal order.
    pub fn hit(&self, x: f64, y: f64) -> Option<NodeId> {
        self.tree
            .locate_all_at_point(&[x, y])
            .map(|node| node.id)
            .min()
    }

    /// The nearest node within `max_distance` of the point.
    pub fn nearest_within(&self, x: f64, y: f64, max_distance: f64) -> Option<NodeId> {
        let max_distance_sq = max_distance * max_distance;
        self.tree
            .nearest_neighbor(&[x, y])
            .filter(|node| node.distance_2(&[x, y]) <= max_distance_sq)
            .map(|node| node.id)
    }

    /// Rebuild the index from a list of boxes.
    ///
    /// This is more efficient than incremental inserts for bulk updates.
    pub fn rebuild(&mut self, boxes: impl IntoIterator<Item = (NodeId, Rect)>) {
        let node_boxes: Vec<_> = boxes
            .into_iter()
            .filter(|(_, rect)| rect.is_valid())
            .map(|(id, rect)| NodeBox::new(id, rect))
            .collect();

        self.tree = RTree::bulk_load(node_boxes);
    }

    /// Clear all boxes from the index.
    pub fn clear(&mut self) {
        self.tree = RTree::new();
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for HitIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_inside_box() {
        let mut index = HitIndex::new();
        index.insert(NodeId(1), Rect::new(0.0, 0.0, 100.0, 40.0));
        index.insert(NodeId(2), Rect::new(200.0, 0.0, 100.0, 40.0));

        assert_eq!(index.hit(50.0, 20.0), Some(NodeId(1)));
        assert_eq!(index.hit(250.0, 39.0), Some(NodeId(2)));
        assert_eq!(index.hit(150.0, 20.0), None);
    }

    #[test]
    fn test_overlap_prefers_earliest() {
        let mut index = HitIndex::new();
        index.insert(NodeId(5), Rect::new(0.0, 0.0, 100.0, 100.0));
        index.insert(NodeId(3), Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(index.hit(75.0, 75.0), Some(NodeId(3)));
    }

    #[test]
    fn test_nearest_within() {
        let mut index = HitIndex::new();
        index.insert(NodeId(1), Rect::new(0.0, 0.0, 10.0, 10.0));

        assert_eq!(index.nearest_within(13.0, 5.0, 5.0), Some(NodeId(1)));
        assert_eq!(index.nearest_within(30.0, 5.0, 5.0), None);
    }

    #[test]
    fn test_rebuild_drops_invalid_boxes() {
        let mut index = HitIndex::new();
        index.insert(NodeId(9), Rect::new(0.0, 0.0, 1.0, 1.0));

        index.rebuild(vec![
            (NodeId(1), Rect::new(0.0, 0.0, 10.0, 10.0)),
            (NodeId(2), Rect::new(f64::NAN, 0.0, 10.0, 10.0)),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.hit(5.0, 5.0), Some(NodeId(1)));
    }

    #[test]
    fn test_clear() {
        let mut index = HitIndex::new();
        index.insert(NodeId(1), Rect::new(0.0, 0.0, 1.0, 1.0));
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.hit(0.5, 0.5), None);
    }
}
