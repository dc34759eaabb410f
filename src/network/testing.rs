//! Scripted endpoint for exercising the session without a network.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::endpoint::{AnswerEndpoint, ChatReply, EndpointError};

/// Returns queued outcomes in order and records every message it was asked.
pub struct ScriptedEndpoint {
    outcomes: Mutex<VecDeque<Result<ChatReply, EndpointError>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, text: &str) {
        self.queue(Ok(ChatReply::text(text)));
    }

    pub fn queue_empty(&self) {
        self.queue(Ok(ChatReply::empty()));
    }

    pub fn queue_error(&self, error: EndpointError) {
        self.queue(Err(error));
    }

    fn queue(&self, outcome: Result<ChatReply, EndpointError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl AnswerEndpoint for ScriptedEndpoint {
    fn ask<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<ChatReply, EndpointError>> {
        self.asked.lock().unwrap().push(message.to_string());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(EndpointError::Malformed("no scripted outcome".to_string())));
        async move { outcome }.boxed()
    }
}

/// Never answers; used to observe the in-flight state and cancellation.
pub struct HangingEndpoint;

impl AnswerEndpoint for HangingEndpoint {
    fn ask<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, Result<ChatReply, EndpointError>> {
        futures::future::pending().boxed()
    }
}
