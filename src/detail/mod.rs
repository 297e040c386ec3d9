//! Detail modal.
//!
//! Builds the detail view of a single non-hub node: title, description and
//! its resource entries. The modal keeps the views it has built, so closing
//! and reopening never recomputes anything and never touches the layout.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::graph::{CanonicalNode, NodeId, Reference, ResourceKind, Resources, TitledLink};

/// Why the modal refused to open.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetailError {
    #[error("{0} is a hub and has no detail view")]
    Hub(NodeId),

    #[error("{0} is not part of the current layout")]
    UnknownNode(NodeId),
}

/// One rendered resource line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResourceEntry {
    /// External link, opened in a new tab.
    Link {
        kind: ResourceKind,
        title: String,
        url: String,
    },
    /// Plain descriptive text.
    Text { kind: ResourceKind, text: String },
}

impl ResourceEntry {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceEntry::Link { kind, .. } | ResourceEntry::Text { kind, .. } => *kind,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.kind().icon()
    }
}

/// Everything the modal shows for a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub node_id: NodeId,
    pub title: String,
    pub description: String,
    pub resources: Vec<ResourceEntry>,
}

impl DetailView {
    /// Build the view for a node. Each slot renders independently and is
    /// omitted when absent.
    pub fn for_node(node: &CanonicalNode) -> Self {
        Self {
            node_id: node.id,
            title: node.title.clone(),
            description: node.description.clone().unwrap_or_default(),
            resources: node.resources.as_ref().map(resource_entries).unwrap_or_default(),
        }
    }
}

fn resource_entries(resources: &Resources) -> Vec<ResourceEntry> {
    let mut entries = Vec::with_capacity(4);

    // The primary resource is only useful with a URL.
    if let Some(TitledLink { title, url: Some(url) }) = &resources.primary {
        entries.push(ResourceEntry::Link {
            kind: ResourceKind::Primary,
            title: title.clone(),
            url: url.clone(),
        });
    }
    if let Some(book) = &resources.book {
        entries.push(reference_entry(ResourceKind::Book, book));
    }
    if let Some(course) = &resources.course {
        entries.push(reference_entry(ResourceKind::Course, course));
    }
    if let Some(challenge) = &resources.challenge {
        entries.push(ResourceEntry::Text {
            kind: ResourceKind::Challenge,
            text: challenge.clone(),
        });
    }

    entries
}

fn reference_entry(kind: ResourceKind, reference: &Reference) -> ResourceEntry {
    match reference {
        Reference::Titled(TitledLink { title, url: Some(url) }) => ResourceEntry::Link {
            kind,
            title: title.clone(),
            url: url.clone(),
        },
        // A title without a verified URL is shown as text.
        Reference::Titled(TitledLink { title, url: None }) => ResourceEntry::Text {
            kind,
            text: title.clone(),
        },
        Reference::Text { text } => ResourceEntry::Text {
            kind,
            text: text.clone(),
        },
    }
}

/// Modal state: which node is shown, and the views built so far.
#[derive(Debug, Default)]
pub struct DetailModal {
    current: Option<NodeId>,
    visible: bool,
    views: HashMap<NodeId, DetailView>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the detail of a node. Hubs are refused.
    pub fn open(&mut self, node: &CanonicalNode) -> Result<&DetailView, DetailError> {
        if !node.is_clickable() {
            return Err(DetailError::Hub(node.id));
        }

        debug!(node = %node.id, "opening detail");
        self.current = Some(node.id);
        self.visible = true;
        Ok(self
            .views
            .entry(node.id)
            .or_insert_with(|| DetailView::for_node(node)))
    }

    /// Hide the modal. The current node and cached views are kept.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// The view currently on screen.
    pub fn current_view(&self) -> Option<&DetailView> {
        if !self.visible {
            return None;
        }
        self.current.and_then(|id| self.views.get(&id))
    }

    /// Forget everything; called when a new layout replaces the old one.
    pub fn reset(&mut self) {
        self.current = None;
        self.visible = false;
        self.views.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, is_hub: bool, resources: Option<Resources>) -> CanonicalNode {
        CanonicalNode {
            id: NodeId(id),
            title: format!("Topic {id}"),
            parent_id: Some(NodeId(1)),
            is_hub,
            description: Some("What it is".to_string()),
            resources,
            children: Vec::new(),
            depth: 1,
            display_delay_ms: 0,
        }
    }

    fn link(title: &str, url: Option<&str>) -> TitledLink {
        TitledLink {
            title: title.to_string(),
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_no_resources_means_no_entries() {
        let view = DetailView::for_node(&node(2, false, None));
        assert!(view.resources.is_empty());
        assert_eq!(view.title, "Topic 2");
        assert_eq!(view.description, "What it is");
    }

    #[test]
    fn test_slot_rules() {
        let resources = Resources {
            primary: Some(link("The Book", Some("https://doc.rust-lang.org/book/"))),
            book: Some(Reference::Text {
                text: "Programming Rust".to_string(),
            }),
            course: Some(Reference::Titled(link("Rust Fundamentals", Some("https://example.org/c")))),
            challenge: Some("Write a CLI".to_string()),
        };
        let view = DetailView::for_node(&node(2, false, Some(resources)));
        assert_eq!(
            view.resources,
            vec![
                ResourceEntry::Link {
                    kind: ResourceKind::Primary,
                    title: "The Book".to_string(),
                    url: "https://doc.rust-lang.org/book/".to_string(),
                },
                ResourceEntry::Text {
                    kind: ResourceKind::Book,
                    text: "Programming Rust".to_string(),
                },
                ResourceEntry::Link {
                    kind: ResourceKind::Course,
                    title: "Rust Fundamentals".to_string(),
                    url: "https://example.org/c".to_string(),
                },
                ResourceEntry::Text {
                    kind: ResourceKind::Challenge,
                    text: "Write a CLI".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_primary_without_url_is_omitted() {
        let resources = Resources {
            primary: Some(link("Unverified", None)),
            ..Resources::default()
        };
        let view = DetailView::for_node(&node(2, false, Some(resources)));
        assert!(view.resources.is_empty());
    }

    #[test]
    fn test_titled_book_without_url_is_text() {
        let resources = Resources {
            book: Some(Reference::Titled(link("Dune", None))),
            ..Resources::default()
        };
        let view = DetailView::for_node(&node(2, false, Some(resources)));
        assert_eq!(
            view.resources,
            vec![ResourceEntry::Text {
                kind: ResourceKind::Book,
                text: "Dune".to_string()
            }]
        );
    }

    #[test]
    fn test_hub_is_refused() {
        let mut modal = DetailModal::new();
        assert_eq!(modal.open(&node(3, true, None)), Err(DetailError::Hub(NodeId(3))));
        assert!(!modal.is_open());
        assert!(modal.current().is_none());
    }

    #[test]
    fn test_close_then_reopen_shows_same_view() {
        let mut modal = DetailModal::new();
        let target = node(2, false, None);
        let first = modal.open(&target).unwrap().clone();

        modal.close();
        assert!(!modal.is_open());
        assert!(modal.current_view().is_none());
        assert_eq!(modal.current(), Some(NodeId(2)));

        let second = modal.open(&target).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(modal.current_view(), Some(&second));
    }

    #[test]
    fn test_reset_forgets_views() {
        let mut modal = DetailModal::new();
        modal.open(&node(2, false, None)).unwrap();
        modal.reset();
        assert!(!modal.is_open());
        assert!(modal.current().is_none());
    }
}
