//! Payload decoding and node normalization.
//!
//! Turns the generator's reply into a `TopicNode` tree:
//! text → JSON object → `nodo_raiz` → normalized tree.

pub mod extract;
pub mod normalize;
pub mod raw;

pub use extract::extract_payload;
pub use normalize::{ChildSource, TitleSource, TopicNode, normalize};
pub use raw::{ErrorBody, GenerateRequest};

use serde_json::Value;

use crate::error::FormatError;

/// Decode a successful generator reply into a normalized tree.
///
/// A missing or null `nodo_raiz` is a format error.
pub fn decode_generation(text: &str) -> Result<TopicNode, FormatError> {
    let payload = extract_payload(text)?;
    root_of(&payload).and_then(normalize)
}

/// The `nodo_raiz` field of an already parsed payload.
pub fn root_of(payload: &Value) -> Result<&Value, FormatError> {
    match payload.get("nodo_raiz") {
        Some(Value::Null) | None => Err(FormatError::MissingRoot),
        Some(root) => Ok(root),
    }
}
