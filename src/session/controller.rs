//! Request lifecycle for one chat session.
//!
//! A cycle runs `Idle -> Sending -> Idle`. Submitting appends the user's
//! message right away (phase one); the endpoint's outcome appends exactly one
//! bot message afterwards (phase two). A failed request never rolls back the
//! user's message, it only adds the apology after it.

use crate::common::ChatMessage;
use crate::network::{AnswerEndpoint, ChatReply, EndpointError};

use super::message_log::MessageLog;

/// Shown when the endpoint answered but gave no usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

/// Shown when the request failed for any reason.
pub const APOLOGY_REPLY: &str =
    "Sorry, there was an error connecting to the server. Please try again later.";

/// The request to issue for a cycle that has just started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub cycle: u64,
    /// The draft exactly as typed, whitespace included.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Sending { cycle: u64 },
}

#[derive(Debug, Default)]
pub struct ChatSession {
    log: MessageLog,
    draft: String,
    in_flight: Option<u64>,
    cycles: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.log.as_slice()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn state(&self) -> CycleState {
        match self.in_flight {
            Some(cycle) => CycleState::Sending { cycle },
            None => CycleState::Idle,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.draft.trim().is_empty()
    }

    /// Starts a cycle if the draft is non-blank and nothing is in flight.
    ///
    /// Returns `None` and leaves the session untouched otherwise.
    pub fn begin_submit(&mut self) -> Option<OutboundRequest> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.log.append(ChatMessage::user(text.clone()));

        self.cycles += 1;
        let cycle = self.cycles;
        self.in_flight = Some(cycle);
        log::info!("Cycle {cycle} started ({} chars)", text.chars().count());

        Some(OutboundRequest { cycle, text })
    }

    /// Finishes the in-flight cycle with the endpoint's outcome.
    ///
    /// Returns `false` when `cycle` is not the one in flight; nothing changes
    /// in that case.
    pub fn resolve(&mut self, cycle: u64, outcome: Result<ChatReply, EndpointError>) -> bool {
        if self.in_flight != Some(cycle) {
            log::debug!(
                "Ignoring resolution for cycle {cycle}; in flight: {:?}",
                self.in_flight
            );
            return false;
        }

        let text = match outcome {
            Ok(ChatReply { text: Some(text) }) => text,
            Ok(ChatReply { text: None }) => {
                log::warn!("Cycle {cycle}: endpoint returned no usable text");
                FALLBACK_REPLY.to_string()
            }
            Err(err) => {
                log::error!("Cycle {cycle}: {} failure: {err}", err.kind());
                APOLOGY_REPLY.to_string()
            }
        };

        self.log.append(ChatMessage::bot(text));
        self.in_flight = None;
        true
    }

    /// Runs a whole cycle against `endpoint`.
    ///
    /// Returns `false` if the submission was not eligible. If the returned
    /// future is dropped before the endpoint answers, the cycle is closed with
    /// the apology so the session stays usable.
    pub async fn submit<E>(&mut self, endpoint: &E) -> bool
    where
        E: AnswerEndpoint + ?Sized,
    {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let guard = CycleGuard {
            session: self,
            cycle: request.cycle,
        };
        let outcome = endpoint.ask(&request.text).await;
        guard.session.resolve(request.cycle, outcome);
        true
    }
}

/// Closes its cycle on drop if nothing else did.
struct CycleGuard<'a> {
    session: &'a mut ChatSession,
    cycle: u64,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if self.session.in_flight == Some(self.cycle) {
            self.session.resolve(self.cycle, Err(EndpointError::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::*;
    use crate::common::Sender;
    use crate::network::testing::{HangingEndpoint, ScriptedEndpoint};

    fn transcript(session: &ChatSession) -> Vec<(Sender, &str)> {
        session
            .messages()
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect()
    }

    #[test]
    fn new_session_is_empty_and_idle() {
        let session = ChatSession::new();
        assert!(session.messages().is_empty());
        assert_eq!(session.draft(), "");
        assert!(!session.is_pending());
        assert_eq!(session.state(), CycleState::Idle);
    }

    #[test]
    fn set_draft_overwrites() {
        let mut session = ChatSession::new();
        session.set_draft("first");
        session.set_draft("second");
        assert_eq!(session.draft(), "second");

        session.clear_draft();
        assert_eq!(session.draft(), "");
    }

    #[test]
    fn begin_submit_appends_user_message_before_any_reply() {
        let mut session = ChatSession::new();
        session.set_draft("  Hello  ");

        let request = session.begin_submit().unwrap();
        assert_eq!(request.text, "  Hello  ");
        assert_eq!(transcript(&session), [(Sender::User, "  Hello  ")]);
        assert_eq!(session.draft(), "");
        assert!(session.is_pending());
        assert_eq!(session.state(), CycleState::Sending { cycle: request.cycle });
    }

    #[test]
    fn whitespace_draft_is_a_no_op() {
        let mut session = ChatSession::new();
        session.set_draft("  \t\n");

        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), None);
        assert!(session.messages().is_empty());
        assert_eq!(session.draft(), "  \t\n");
        assert!(!session.is_pending());
    }

    #[test]
    fn submit_while_pending_is_a_no_op() {
        let mut session = ChatSession::new();
        session.set_draft("one");
        session.begin_submit().unwrap();

        session.set_draft("two");
        assert!(!session.can_submit());
        assert_eq!(session.begin_submit(), None);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.draft(), "two");
    }

    #[test]
    fn resolve_appends_one_bot_message_and_goes_idle() {
        let mut session = ChatSession::new();
        session.set_draft("Hello");
        let request = session.begin_submit().unwrap();

        assert!(session.resolve(request.cycle, Ok(ChatReply::text("Hi there"))));
        assert_eq!(
            transcript(&session),
            [(Sender::User, "Hello"), (Sender::Bot, "Hi there")]
        );
        assert!(!session.is_pending());
    }

    #[test]
    fn stale_or_duplicate_resolution_is_ignored() {
        let mut session = ChatSession::new();
        session.set_draft("Hello");
        let request = session.begin_submit().unwrap();

        assert!(!session.resolve(request.cycle + 1, Ok(ChatReply::text("wrong"))));
        assert!(session.is_pending());

        assert!(session.resolve(request.cycle, Ok(ChatReply::text("right"))));
        assert!(!session.resolve(request.cycle, Ok(ChatReply::text("again"))));
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn cycles_are_numbered_in_order() {
        let mut session = ChatSession::new();
        session.set_draft("a");
        let first = session.begin_submit().unwrap();
        session.resolve(first.cycle, Ok(ChatReply::text("A")));

        session.set_draft("b");
        let second = session.begin_submit().unwrap();
        assert!(second.cycle > first.cycle);
    }

    #[tokio::test]
    async fn hello_round_trip() {
        let endpoint = ScriptedEndpoint::new();
        endpoint.queue_reply("Hi there");

        let mut session = ChatSession::new();
        session.set_draft("Hello");
        assert!(session.submit(&endpoint).await);

        assert_eq!(
            transcript(&session),
            [(Sender::User, "Hello"), (Sender::Bot, "Hi there")]
        );
        assert_eq!(session.draft(), "");
        assert!(!session.is_pending());
        assert_eq!(endpoint.asked(), ["Hello"]);
    }

    #[tokio::test]
    async fn reply_without_text_uses_fallback() {
        let endpoint = ScriptedEndpoint::new();
        endpoint.queue_empty();

        let mut session = ChatSession::new();
        session.set_draft("Hello");
        session.submit(&endpoint).await;

        assert_eq!(session.messages()[1].text, FALLBACK_REPLY);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn failure_appends_apology_and_keeps_user_message() {
        let endpoint = ScriptedEndpoint::new();
        endpoint.queue_error(EndpointError::Status(StatusCode::INTERNAL_SERVER_ERROR));

        let mut session = ChatSession::new();
        session.set_draft("Hello");
        session.submit(&endpoint).await;

        assert_eq!(
            transcript(&session),
            [(Sender::User, "Hello"), (Sender::Bot, APOLOGY_REPLY)]
        );
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn ineligible_submit_never_calls_the_endpoint() {
        let endpoint = ScriptedEndpoint::new();
        let mut session = ChatSession::new();
        session.set_draft("   ");

        assert!(!session.submit(&endpoint).await);
        assert!(endpoint.asked().is_empty());
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn cycles_never_interleave() {
        let endpoint = ScriptedEndpoint::new();
        endpoint.queue_reply("A1");
        endpoint.queue_error(EndpointError::Malformed("bad".to_string()));
        endpoint.queue_empty();

        let mut session = ChatSession::new();
        for text in ["Q1", "Q2", "Q3"] {
            session.set_draft(text);
            session.submit(&endpoint).await;
        }

        assert_eq!(
            transcript(&session),
            [
                (Sender::User, "Q1"),
                (Sender::Bot, "A1"),
                (Sender::User, "Q2"),
                (Sender::Bot, APOLOGY_REPLY),
                (Sender::User, "Q3"),
                (Sender::Bot, FALLBACK_REPLY),
            ]
        );
    }

    #[tokio::test]
    async fn dropped_submit_releases_pending() {
        let mut session = ChatSession::new();
        session.set_draft("Hello");

        let result =
            tokio::time::timeout(Duration::from_millis(20), session.submit(&HangingEndpoint)).await;
        assert!(result.is_err());

        assert!(!session.is_pending());
        assert_eq!(
            transcript(&session),
            [(Sender::User, "Hello"), (Sender::Bot, APOLOGY_REPLY)]
        );

        session.set_draft("again");
        assert!(session.can_submit());
    }
}
