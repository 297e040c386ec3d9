//! Generation request lifecycle.
//!
//! Validates input, refuses to start while a request is in flight, tags
//! every request with a monotonic token and turns the reply into either a
//! normalized tree or a single user-facing error. Replies carrying a token
//! other than the latest are dropped.

use tracing::{info, warn};

use crate::error::{PathMapError, TransportError};
use crate::payload::{ErrorBody, GenerateRequest, TopicNode, decode_generation};

/// Submit label while idle.
pub const IDLE_LABEL: &str = "Generate map";

/// Submit label while a request is in flight.
pub const BUSY_LABEL: &str = "Generating...";

/// Identifies one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

/// A raw HTTP reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request was not started. None of these touch the surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BeginError {
    #[error("Please define a goal.")]
    EmptyGoal,

    #[error("Please choose a level.")]
    EmptyLevel,

    #[error("a generation request is already in flight")]
    Busy,
}

/// Outcome of feeding a reply back.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The reply belongs to a superseded request; ignore it.
    Stale,
    /// Render this tree.
    Ready(TopicNode),
    /// Show this error in place of the map.
    Failed(PathMapError),
}

/// Orchestrates generation requests.
#[derive(Debug, Default)]
pub struct FetchOrchestrator {
    latest: u64,
    in_flight: Option<RequestToken>,
}

impl FetchOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. On success the caller clears the surface, shows the
    /// loading state and sends the returned body.
    pub fn begin(&mut self, goal: &str, level: &str) -> Result<(RequestToken, GenerateRequest), BeginError> {
        let goal = goal.trim();
        let level = level.trim();
        if goal.is_empty() {
            return Err(BeginError::EmptyGoal);
        }
        if level.is_empty() {
            return Err(BeginError::EmptyLevel);
        }
        if self.in_flight.is_some() {
            return Err(BeginError::Busy);
        }

        self.latest += 1;
        let token = RequestToken(self.latest);
        self.in_flight = Some(token);
        info!(token = token.0, "generation request started");

        Ok((
            token,
            GenerateRequest {
                goal: goal.to_string(),
                level: level.to_string(),
            },
        ))
    }

    /// Feed back the reply (or transport failure) of a request.
    pub fn finish(&mut self, token: RequestToken, reply: Result<HttpReply, TransportError>) -> Completion {
        if token.0 != self.latest {
            warn!(token = token.0, latest = self.latest, "dropping stale generation reply");
            return Completion::Stale;
        }
        if self.in_flight == Some(token) {
            self.in_flight = None;
        }

        match reply.map_err(PathMapError::from).and_then(interpret_reply) {
            Ok(tree) => Completion::Ready(tree),
            Err(e) => {
                warn!(error = %e, "generation failed");
                Completion::Failed(e)
            }
        }
    }

    /// Drop the in-flight request; any reply it later produces is stale.
    pub fn abandon(&mut self) {
        if self.in_flight.take().is_some() {
            self.latest += 1;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_busy() { BUSY_LABEL } else { IDLE_LABEL }
    }
}

/// Turn an HTTP reply into a tree or a user-facing error.
pub fn interpret_reply(reply: HttpReply) -> Result<TopicNode, PathMapError> {
    if !reply.is_success() {
        return Err(TransportError::Http {
            status: reply.status,
            message: error_message(&reply),
        }
        .into());
    }
    decode_generation(&reply.body).map_err(PathMapError::from)
}

/// The server's `error` string, or `server error <status>`.
pub fn error_message(reply: &HttpReply) -> String {
    serde_json::from_str::<ErrorBody>(&reply.body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("server error {}", reply.status))
}
