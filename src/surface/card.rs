//! Node card view model.
//!
//! What a renderer needs to draw one node: its DOM id, label, classes,
//! badges and reveal delay. Shared by the DOM surface and `PathMapWasm`.

use serde::Serialize;

use crate::graph::CanonicalNode;
use crate::layout::RevealScheduler;

/// A drawable node card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCard {
    pub dom_id: String,
    pub title: String,
    pub class_name: String,
    pub badges: Vec<&'static str>,
    /// CSS `animation-delay` value.
    pub animation_delay: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_dom_id: Option<String>,
    pub clickable: bool,
}

impl NodeCard {
    pub fn for_node(node: &CanonicalNode) -> Self {
        Self {
            dom_id: node.id.to_string(),
            title: node.title.clone(),
            class_name: if node.is_hub { "node hub" } else { "node" }.to_string(),
            badges: node.resources.as_ref().map(|r| r.badges()).unwrap_or_default(),
            animation_delay: RevealScheduler::css_delay(node.display_delay_ms),
            parent_dom_id: node.parent_id.map(|id| id.to_string()),
            clickable: node.is_clickable(),
        }
    }

    /// Badges joined for the card's badge row; empty when there are none.
    pub fn badge_text(&self) -> String {
        self.badges.join(" ")
    }
}
