//! Wire shapes exchanged with the generator.
//!
//! Tree nodes themselves stay as `serde_json::Value` because their field
//! names vary by node kind; see `normalize` for the dispatch. The fixed
//! shapes (error body, request, resource bundle) are typed here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::graph::{Reference, Resources, TitledLink};

/// Body of the generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub goal: String,
    pub level: String,
}

/// Body sent alongside a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A link as the generator writes it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLink {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Book and course slots come either as a link object or a bare title.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawReference {
    Titled(RawLink),
    Text(String),
}

/// The `recursos` bundle. Slots decode independently: a slot of the wrong
/// shape is dropped on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResources {
    #[serde(default, deserialize_with = "lenient_slot")]
    pub recurso_principal: Option<RawLink>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub libro_recomendado: Option<RawReference>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub curso_profundizacion: Option<RawReference>,
    #[serde(default, deserialize_with = "lenient_slot")]
    pub desafio_practico: Option<String>,
}

fn lenient_slot<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(slot) => Ok(Some(slot)),
        Err(e) => {
            warn!(error = %e, "ignoring malformed resource slot");
            Ok(None)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RawLink {
    fn into_titled(self) -> Option<TitledLink> {
        let url = non_blank(self.url);
        let title = non_blank(self.titulo).or_else(|| url.clone())?;
        Some(TitledLink { title, url })
    }
}

impl RawReference {
    fn into_reference(self) -> Option<Reference> {
        match self {
            RawReference::Titled(link) => {
                non_blank(link.titulo.clone())?;
                link.into_titled().map(Reference::Titled)
            }
            RawReference::Text(text) => non_blank(Some(text)).map(|text| Reference::Text { text }),
        }
    }
}

impl RawResources {
    /// Normalize the bundle. Blank slots are dropped; an all-blank bundle
    /// becomes `None`.
    pub fn into_resources(self) -> Option<Resources> {
        let resources = Resources {
            primary: self.recurso_principal.and_then(RawLink::into_titled),
            book: self.libro_recomendado.and_then(RawReference::into_reference),
            course: self.curso_profundizacion.and_then(RawReference::into_reference),
            challenge: non_blank(self.desafio_practico),
        };
        (!resources.is_empty()).then_some(resources)
    }
}
