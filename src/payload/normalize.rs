//! Node normalization.
//!
//! The generator names the same concept differently depending on node kind:
//! a topic has `titulo`/`sub_nodos`, a stage `titulo_etapa`/`etapas`, a
//! branch `titulo_rama`/`ramas`. Each concept is resolved by one
//! discriminator with a fixed precedence; only the first present field is
//! honored.

use serde_json::{Map, Value};
use tracing::warn;

use super::raw::RawResources;
use crate::error::FormatError;
use crate::graph::Resources;

/// A normalized node before layout assigns ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicNode {
    pub title: String,
    pub is_hub: bool,
    pub description: Option<String>,
    pub resources: Option<Resources>,
    pub children: Vec<TopicNode>,
}

impl TopicNode {
    /// A leaf with only a title.
    pub fn leaf(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_hub: false,
            description: None,
            resources: None,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TopicNode::size).sum::<usize>()
    }

    /// Number of levels in this subtree.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TopicNode::depth).max().unwrap_or(0)
    }
}

/// Which raw field supplies a node's title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    Titulo,
    TituloEtapa,
    TituloRama,
    Missing,
}

impl TitleSource {
    const PRECEDENCE: [TitleSource; 3] = [
        TitleSource::Titulo,
        TitleSource::TituloEtapa,
        TitleSource::TituloRama,
    ];

    pub fn field(self) -> Option<&'static str> {
        match self {
            TitleSource::Titulo => Some("titulo"),
            TitleSource::TituloEtapa => Some("titulo_etapa"),
            TitleSource::TituloRama => Some("titulo_rama"),
            TitleSource::Missing => None,
        }
    }

    /// First source holding a non-empty string.
    pub fn resolve(obj: &Map<String, Value>) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|source| source.read(obj).is_some())
            .unwrap_or(TitleSource::Missing)
    }

    /// Branch entries take their title from `titulo_rama` first.
    pub fn resolve_branch(obj: &Map<String, Value>) -> Self {
        if TitleSource::TituloRama.read(obj).is_some() {
            TitleSource::TituloRama
        } else {
            Self::resolve(obj)
        }
    }

    fn read(self, obj: &Map<String, Value>) -> Option<&str> {
        obj.get(self.field()?)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The resolved title, or the empty string when missing.
    pub fn title(self, obj: &Map<String, Value>) -> String {
        self.read(obj).unwrap_or_default().to_string()
    }
}

/// Which raw field supplies a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSource {
    SubNodos,
    Etapas,
    Ramas,
    Leaf,
}

impl ChildSource {
    const PRECEDENCE: [ChildSource; 3] = [ChildSource::SubNodos, ChildSource::Etapas, ChildSource::Ramas];

    pub fn field(self) -> Option<&'static str> {
        match self {
            ChildSource::SubNodos => Some("sub_nodos"),
            ChildSource::Etapas => Some("etapas"),
            ChildSource::Ramas => Some("ramas"),
            ChildSource::Leaf => None,
        }
    }

    /// First source holding an array. An empty array still wins.
    pub fn resolve(obj: &Map<String, Value>) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|source| source.entries(obj).is_some())
            .unwrap_or(ChildSource::Leaf)
    }

    /// Children from a branch collection are hubs.
    pub fn forces_hub(self) -> bool {
        matches!(self, ChildSource::Ramas)
    }

    fn entries(self, obj: &Map<String, Value>) -> Option<&Vec<Value>> {
        obj.get(self.field()?).and_then(Value::as_array)
    }
}

/// Normalize a raw tree.
///
/// Fails only when the root itself is not an object. Non-object entries
/// inside child collections are skipped.
pub fn normalize(raw: &Value) -> Result<TopicNode, FormatError> {
    let obj = raw.as_object().ok_or(FormatError::NotAnObject)?;
    Ok(normalize_object(obj, false))
}

fn normalize_object(obj: &Map<String, Value>, as_branch: bool) -> TopicNode {
    let title_source = if as_branch {
        TitleSource::resolve_branch(obj)
    } else {
        TitleSource::resolve(obj)
    };
    if title_source == TitleSource::Missing {
        warn!("node without a title, rendering it blank");
    }

    let flagged_hub = obj.get("es_hub").and_then(Value::as_bool).unwrap_or(false);

    let description = obj
        .get("descripcion")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    let child_source = ChildSource::resolve(obj);
    let children = child_source
        .entries(obj)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match entry.as_object() {
                    Some(child) => Some(normalize_object(child, child_source.forces_hub())),
                    None => {
                        warn!(
                            field = child_source.field().unwrap_or_default(),
                            "skipping non-object child entry"
                        );
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    TopicNode {
        title: title_source.title(obj),
        is_hub: as_branch || flagged_hub,
        description,
        resources: resources_of(obj),
        children,
    }
}

fn resources_of(obj: &Map<String, Value>) -> Option<Resources> {
    let raw = obj.get("recursos")?;
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value::<RawResources>(raw.clone()) {
        Ok(raw) => raw.into_resources(),
        Err(e) => {
            warn!(error = %e, "ignoring malformed resource bundle");
            None
        }
    }
}
