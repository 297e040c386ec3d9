//! Runtime configuration handed in from JavaScript.
//!
//! Every field has a default, so JS may pass `undefined`, `{}` or any subset.

use serde::Deserialize;

use crate::layout::reveal::REVEAL_STEP_MS;

/// Fixed wait before the first connector draw.
pub const SETTLE_DELAY_MS: u32 = 500;

/// Default generation endpoint.
pub const DEFAULT_ENDPOINT: &str = "/generate-path";

/// Configuration for a mind-map instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// URL the generation request is posted to.
    pub endpoint: String,
    /// Delay increment between consecutive nodes in the reveal cascade.
    pub reveal_step_ms: u32,
    /// Wait after mounting before connectors are first computed.
    pub settle_delay_ms: u32,
    /// Element ids of the page shell.
    pub elements: ShellElements,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reveal_step_ms: REVEAL_STEP_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            elements: ShellElements::default(),
        }
    }
}

/// Ids of the elements the DOM app binds to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellElements {
    pub container: String,
    pub generate_button: String,
    pub goal_input: String,
    pub level_select: String,
    pub loader: String,
    pub modal_overlay: String,
    pub modal_close: String,
    pub modal_title: String,
    pub modal_description: String,
    pub modal_resources: String,
}

impl Default for ShellElements {
    fn default() -> Self {
        Self {
            container: "mindmap-container".to_string(),
            generate_button: "generateBtn".to_string(),
            goal_input: "userInput".to_string(),
            level_select: "level".to_string(),
            loader: "loader".to_string(),
            modal_overlay: "modal-overlay".to_string(),
            modal_close: "modal-close-btn".to_string(),
            modal_title: "modal-title".to_string(),
            modal_description: "modal-description".to_string(),
            modal_resources: "modal-resources".to_string(),
        }
    }
}
