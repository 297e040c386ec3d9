//! Fetch orchestration.
//!
//! `orchestrator` is the platform-independent request lifecycle; `client`
//! is the browser transport that feeds it.

#[cfg(target_arch = "wasm32")]
pub mod client;
pub mod orchestrator;

pub use orchestrator::{
    BUSY_LABEL, BeginError, Completion, FetchOrchestrator, HttpReply, IDLE_LABEL, RequestToken, error_message,
    interpret_reply,
};
