//! Error taxonomy for a render attempt.
//!
//! Format and transport failures abort the attempt and surface a single
//! message. Geometry failures live next to the connector renderer and never
//! reach this level.

use thiserror::Error;

/// The payload could not be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("the generator returned no valid path")]
    MissingRoot,

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// The generation request failed before a payload was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Non-success HTTP status. `message` is what the user sees.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

/// Anything that terminates a render attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathMapError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PathMapError {
    /// The single line shown in place of the mind-map.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
