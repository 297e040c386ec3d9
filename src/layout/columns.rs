//! Breadth-first column layout.
//!
//! Groups the normalized tree into one column per depth, left to right.
//! Within a column nodes appear in parent-major source order. Ids, parent
//! back-references and reveal delays are assigned here, once, through an
//! explicit `LayoutSession`; nothing is process-global.
//!
//! # Algorithm
//!
//! 1. Seed the level queue with the root at depth 0.
//! 2. For each queued node: assign the next id and delay, record the parent
//!    id, append to the current column, queue its children with the fresh
//!    id as their parent.
//! 3. Stop when a level is empty.

use tracing::debug;

use super::reveal::RevealScheduler;
use crate::graph::{CanonicalNode, NodeId, PathGraph, TreeEdge};
use crate::payload::TopicNode;

/// One depth level of the layout, in display order.
pub type Column = Vec<NodeId>;

/// Configuration for the column layout.
#[derive(Debug, Clone)]
pub struct ColumnLayoutConfig {
    /// Delay increment between consecutive nodes.
    pub reveal_step_ms: u32,
}

impl Default for ColumnLayoutConfig {
    fn default() -> Self {
        Self {
            reveal_step_ms: super::reveal::REVEAL_STEP_MS,
        }
    }
}

/// Per-layout state threaded through the traversal.
#[derive(Debug)]
pub struct LayoutSession {
    next_id: u32,
    reveal: RevealScheduler,
}

impl LayoutSession {
    pub fn new(reveal: RevealScheduler) -> Self {
        Self { next_id: 0, reveal }
    }

    /// Next sequential id, starting at 1.
    pub fn next_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub fn next_delay(&mut self) -> u32 {
        self.reveal.next_delay()
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next_id
    }
}

/// The committed result of a layout: columns plus the arena they index.
#[derive(Default)]
pub struct MindMapLayout {
    graph: PathGraph,
    columns: Vec<Column>,
}

impl MindMapLayout {
    /// A layout with no columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Nodes of column `index`, in display order.
    pub fn column_nodes(&self, index: usize) -> Vec<&CanonicalNode> {
        self.columns
            .get(index)
            .map(|column| column.iter().filter_map(|&id| self.graph.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn node(&self, id: NodeId) -> Option<&CanonicalNode> {
        self.graph.get(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<&CanonicalNode> {
        self.graph.parent_of(id)
    }

    /// All nodes in global traversal order.
    pub fn nodes(&self) -> impl Iterator<Item = &CanonicalNode> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> Vec<TreeEdge> {
        self.graph.edges()
    }

    pub fn root(&self) -> Option<&CanonicalNode> {
        self.columns
            .first()
            .and_then(|column| column.first())
            .and_then(|&id| self.graph.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The column layout engine.
pub struct ColumnLayout {
    config: ColumnLayoutConfig,
}

impl ColumnLayout {
    /// Create a new column layout with the given configuration.
    pub fn new(config: ColumnLayoutConfig) -> Self {
        Self { config }
    }

    /// Create a column layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ColumnLayoutConfig::default())
    }

    /// Lay out a tree. `None` yields an empty layout.
    pub fn layout(&self, root: Option<TopicNode>) -> MindMapLayout {
        let Some(root) = root else {
            return MindMapLayout::empty();
        };

        let mut session = LayoutSession::new(RevealScheduler::new(self.config.reveal_step_ms));
        let mut graph = PathGraph::with_capacity(root.size());
        let mut columns: Vec<Column> = Vec::new();

        let mut level: Vec<(TopicNode, Option<NodeId>)> = vec![(root, None)];
        let mut depth = 0u32;

        while !level.is_empty() {
            let mut column = Column::with_capacity(level.len());
            let mut next_level = Vec::new();

            for (topic, parent_id) in level {
                let id = session.next_id();
                let TopicNode {
                    title,
                    is_hub,
                    description,
                    resources,
                    children,
                } = topic;

                let node = CanonicalNode {
                    id,
                    title,
                    parent_id,
                    is_hub,
                    description,
                    resources,
                    children: Vec::with_capacity(children.len()),
                    depth,
                    display_delay_ms: session.next_delay(),
                };

                // Parents are always inserted a level earlier.
                if let Err(e) = graph.insert(node) {
                    debug!(error = %e, "node rejected by arena");
                    continue;
                }

                column.push(id);
                next_level.extend(children.into_iter().map(|child| (child, Some(id))));
            }

            columns.push(column);
            level = next_level;
            depth += 1;
        }

        debug!(
            columns = columns.len(),
            nodes = session.issued(),
            "column layout committed"
        );

        MindMapLayout { graph, columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::normalize;
    use serde_json::json;

    fn titles(layout: &MindMapLayout) -> Vec<Vec<String>> {
        (0..layout.column_count())
            .map(|i| layout.column_nodes(i).iter().map(|n| n.title.clone()).collect())
            .collect()
    }

    fn topic(title: &str, children: Vec<TopicNode>) -> TopicNode {
        TopicNode {
            children,
            ..TopicNode::leaf(title)
        }
    }

    #[test]
    fn test_empty_root_yields_no_columns() {
        let layout = ColumnLayout::with_defaults().layout(None);
        assert!(layout.is_empty());
        assert_eq!(layout.node_count(), 0);
        assert!(layout.root().is_none());
    }

    #[test]
    fn test_single_node() {
        let layout = ColumnLayout::with_defaults().layout(Some(TopicNode::leaf("Only")));
        assert_eq!(layout.column_count(), 1);
        let root = layout.root().unwrap();
        assert_eq!(root.id, NodeId(1));
        assert!(root.parent_id.is_none());
        assert_eq!(root.display_delay_ms, 0);
    }

    #[test]
    fn test_columns_are_parent_major() {
        // Root -> [A -> [A1, A2], B -> [B1]]
        let tree = topic(
            "Root",
            vec![
                topic("A", vec![TopicNode::leaf("A1"), TopicNode::leaf("A2")]),
                topic("B", vec![TopicNode::leaf("B1")]),
            ],
        );
        let layout = ColumnLayout::with_defaults().layout(Some(tree));

        assert_eq!(
            titles(&layout),
            vec![
                vec!["Root".to_string()],
                vec!["A".to_string(), "B".to_string()],
                vec!["A1".to_string(), "A2".to_string(), "B1".to_string()],
            ]
        );
    }

    #[test]
    fn test_ids_follow_traversal_order() {
        let tree = topic(
            "Root",
            vec![topic("A", vec![TopicNode::leaf("A1")]), TopicNode::leaf("B")],
        );
        let layout = ColumnLayout::with_defaults().layout(Some(tree));
        let ids: Vec<u32> = layout.nodes().map(|n| n.id.raw()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let a1 = layout.column_nodes(2)[0];
        assert_eq!(a1.title, "A1");
        assert_eq!(a1.parent_id, Some(NodeId(2)));
        assert_eq!(layout.parent(a1.id).unwrap().title, "A");
    }

    #[test]
    fn test_parent_resolves_into_previous_column() {
        let tree = normalize(&json!({
            "titulo": "Root",
            "sub_nodos": [
                {"titulo": "A", "etapas": [{"titulo_etapa": "A-1"}, {"titulo_etapa": "A-2"}]},
                {"titulo": "B", "ramas": [{"titulo_rama": "B1", "sub_nodos": [{"titulo": "deep"}]}]}
            ]
        }))
        .unwrap();
        let layout = ColumnLayout::with_defaults().layout(Some(tree));

        for (index, column) in layout.columns().iter().enumerate().skip(1) {
            let previous = &layout.columns()[index - 1];
            for &id in column {
                let parent = layout.node(id).and_then(|n| n.parent_id).unwrap();
                assert_eq!(previous.iter().filter(|&&p| p == parent).count(), 1);
                assert_eq!(layout.node(id).unwrap().depth as usize, index);
            }
        }
        assert_eq!(layout.column_count(), 4);
    }

    #[test]
    fn test_delays_step_across_columns() {
        let tree = topic(
            "Root",
            vec![topic("A", vec![TopicNode::leaf("A1")]), TopicNode::leaf("B")],
        );
        let layout = ColumnLayout::new(ColumnLayoutConfig { reveal_step_ms: 50 }).layout(Some(tree));
        let delays: Vec<u32> = layout.nodes().map(|n| n.display_delay_ms).collect();
        assert_eq!(delays, vec![0, 50, 100, 150]);
        for pair in delays.windows(2) {
            assert_eq!(pair[1] - pair[0], 50);
        }
    }

    #[test]
    fn test_children_and_edges_are_recorded() {
        let tree = topic("Root", vec![TopicNode::leaf("A"), TopicNode::leaf("B")]);
        let layout = ColumnLayout::with_defaults().layout(Some(tree));
        assert_eq!(layout.root().unwrap().children, vec![NodeId(2), NodeId(3)]);
        assert_eq!(
            layout.edges(),
            vec![TreeEdge::new(NodeId(1), NodeId(2)), TreeEdge::new(NodeId(1), NodeId(3))]
        );
    }

    #[test]
    fn test_repeated_layouts_do_not_share_ids() {
        let engine = ColumnLayout::with_defaults();
        let first = engine.layout(Some(TopicNode::leaf("One")));
        let second = engine.layout(Some(TopicNode::leaf("Two")));
        assert_eq!(first.root().unwrap().id, NodeId(1));
        assert_eq!(second.root().unwrap().id, NodeId(1));
    }

    #[test]
    fn test_session_counts_ids() {
        let mut session = LayoutSession::new(RevealScheduler::default());
        assert_eq!(session.next_id(), NodeId(1));
        assert_eq!(session.next_id(), NodeId(2));
        assert_eq!(session.issued(), 2);
    }
}
