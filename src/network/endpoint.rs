//! Contract with the remote answering service.
//!
//! The service maps one submitted text to one reply text. Everything that can
//! go wrong on the way is an [`EndpointError`]; callers fold all of them into a
//! single failure outcome and only look at the variant for logging.

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Path of the chat resource, appended to the configured base address.
pub const CHAT_PATH: &str = "/api/chat/";

/// Something that can answer a chat message.
pub trait AnswerEndpoint: Send + Sync {
    fn ask<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<ChatReply, EndpointError>>;
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("request abandoned before the endpoint answered")]
    Abandoned,
    #[error("network worker is not running")]
    WorkerUnavailable,
}

impl EndpointError {
    /// Short tag used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            EndpointError::Transport(_) => "transport",
            EndpointError::Status(_) => "status",
            EndpointError::Malformed(_) => "malformed",
            EndpointError::Abandoned => "abandoned",
            EndpointError::WorkerUnavailable => "worker",
        }
    }
}

/// Outbound JSON body: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ChatRequestBody<'a> {
    pub message: &'a str,
}

/// A successful answer. `text` is `None` when the service gave nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatReply {
    pub text: Option<String>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }

    /// Interpret a raw response body.
    ///
    /// Only a body that does not parse, or a bare `null`, is malformed. Any
    /// other JSON value is a reply; it carries text when `response` is a
    /// non-empty string or a non-zero number, and none otherwise.
    pub fn from_body(body: &str) -> Result<Self, EndpointError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| EndpointError::Malformed(err.to_string()))?;

        if value.is_null() {
            return Err(EndpointError::Malformed("body is `null`".to_string()));
        }

        let text = match value.get("response") {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(Value::Number(number)) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            _ => None,
        };

        Ok(Self { text })
    }
}
