//! Connector renderer.
//!
//! Recomputes the full connector set from scratch on every call, so calling
//! it twice with unchanged geometry yields the same set. Edges whose
//! endpoints cannot be measured are skipped; a partial set is an accepted
//! degraded state.

use serde::Serialize;
use tracing::debug;

use super::curve::CubicConnector;
use super::geometry::Extent;
use super::measure::BoxMeasure;
use crate::graph::NodeId;
use crate::layout::MindMapLayout;

/// A connector endpoint could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PartialGeometryError {
    #[error("parent {parent} of {child} is not part of the layout")]
    UnknownParent { parent: NodeId, child: NodeId },

    #[error("{0} has no measurable box")]
    Unmeasured(NodeId),
}

/// The result of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSet {
    /// Size the overlay must take before drawing.
    pub extent: Extent,
    pub connectors: Vec<CubicConnector>,
    /// Edges dropped because an endpoint was missing.
    pub skipped: usize,
}

impl ConnectorSet {
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

/// Computes connectors for a committed layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorRenderer;

impl ConnectorRenderer {
    pub fn new() -> Self {
        Self
    }

    /// One connector per node with a parent, in traversal order.
    ///
    /// An empty layout yields an empty set sized to the current extent.
    pub fn render(&self, layout: &MindMapLayout, measure: &dyn BoxMeasure) -> ConnectorSet {
        let mut set = ConnectorSet {
            extent: measure.content_extent(),
            connectors: Vec::with_capacity(layout.node_count().saturating_sub(1)),
            skipped: 0,
        };

        for node in layout.nodes() {
            let Some(parent_id) = node.parent_id else {
                continue;
            };
            match self.connect(layout, measure, parent_id, node.id) {
                Ok(connector) => set.connectors.push(connector),
                Err(e) => {
                    debug!(error = %e, "connector skipped");
                    set.skipped += 1;
                }
            }
        }

        set
    }

    /// Connector for a single edge.
    pub fn connect(
        &self,
        layout: &MindMapLayout,
        measure: &dyn BoxMeasure,
        parent: NodeId,
        child: NodeId,
    ) -> Result<CubicConnector, PartialGeometryError> {
        let child_node = layout.node(child).ok_or(PartialGeometryError::Unmeasured(child))?;
        if layout.node(parent).is_none() {
            return Err(PartialGeometryError::UnknownParent { parent, child });
        }

        let parent_box = measure
            .measure(parent)
            .ok_or(PartialGeometryError::Unmeasured(parent))?;
        let child_box = measure
            .measure(child)
            .ok_or(PartialGeometryError::Unmeasured(child))?;

        Ok(CubicConnector::between(
            parent,
            parent_box,
            child,
            child_box,
            child_node.display_delay_ms,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::geometry::Rect;
    use crate::connector::measure::StaticBoxes;
    use crate::layout::ColumnLayout;
    use crate::payload::TopicNode;

    /// Root -> [A, B]; columns 200px apart, rows 60px apart.
    fn fixture() -> (MindMapLayout, StaticBoxes) {
        let tree = TopicNode {
            children: vec![TopicNode::leaf("A"), TopicNode::leaf("B")],
            ..TopicNode::leaf("Root")
        };
        let layout = ColumnLayout::with_defaults().layout(Some(tree));

        let mut boxes = StaticBoxes::with_extent(Extent::new(400.0, 120.0));
        for (col, column) in layout.columns().iter().enumerate() {
            for (row, &id) in column.iter().enumerate() {
                boxes.insert(id, Rect::new(col as f64 * 200.0, row as f64 * 60.0, 100.0, 40.0));
            }
        }
        (layout, boxes)
    }

    #[test]
    fn test_one_connector_per_child() {
        let (layout, boxes) = fixture();
        let set = ConnectorRenderer::new().render(&layout, &boxes);

        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped, 0);
        assert_eq!(set.extent, Extent::new(400.0, 120.0));

        let first = &set.connectors[0];
        assert_eq!((first.from, first.to), (NodeId(1), NodeId(2)));
        assert_eq!(first.svg_path(), "M 100 20 C 150 20, 150 20, 200 20");
        assert_eq!(first.delay_ms, 50);

        let second = &set.connectors[1];
        assert_eq!(second.svg_path(), "M 100 20 C 150 20, 150 80, 200 80");
        assert_eq!(second.delay_ms, 100);
    }

    #[test]
    fn test_render_is_idempotent() {
        let (layout, boxes) = fixture();
        let renderer = ConnectorRenderer::new();
        assert_eq!(renderer.render(&layout, &boxes), renderer.render(&layout, &boxes));
    }

    #[test]
    fn test_missing_box_skips_edge() {
        let (layout, mut boxes) = fixture();
        boxes.remove(NodeId(1));
        let set = ConnectorRenderer::new().render(&layout, &boxes);
        assert!(set.is_empty());
        assert_eq!(set.skipped, 2);
    }

    #[test]
    fn test_missing_child_box_skips_only_that_edge() {
        let (layout, mut boxes) = fixture();
        boxes.remove(NodeId(3));
        let set = ConnectorRenderer::new().render(&layout, &boxes);
        assert_eq!(set.len(), 1);
        assert_eq!(set.connectors[0].to, NodeId(2));
        assert_eq!(set.skipped, 1);
    }

    #[test]
    fn test_empty_layout_is_noop() {
        let set = ConnectorRenderer::new().render(&MindMapLayout::empty(), &StaticBoxes::new());
        assert!(set.is_empty());
        assert_eq!(set.skipped, 0);
    }

    #[test]
    fn test_connect_reports_unknown_parent() {
        let (layout, boxes) = fixture();
        let err = ConnectorRenderer::new()
            .connect(&layout, &boxes, NodeId(99), NodeId(2))
            .unwrap_err();
        assert_eq!(
            err,
            PartialGeometryError::UnknownParent {
                parent: NodeId(99),
                child: NodeId(2)
            }
        );
    }
}
