// src/chat/session.rs
//! Chat transcript owned by one session.
//!
//! Turns are appended in strict user -> assistant order. A single request may
//! be in flight; submissions made meanwhile are rejected, not queued.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use super::context::ResumeContext;
use super::ChatBackend;
use crate::error::InputError;
use crate::types::{ChatReply, ChatRequest};

pub const ONBOARDING_MESSAGE: &str = "Hello! I'm TrueFit AI, your personal career strategist.\n\n\
I can analyze your resume and guide your career path. To get started:\n\
1. Upload your resume.\n\
2. Ask me anything, for example:\n\
   * 'Rate my resume for a Senior React Developer role.'\n\
   * 'What skills do I need for AI Engineering?'\n\
   * 'Mock interview me for a Product Manager position.'\n\n\
How can I help you advance today?";

pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response right now.";

pub const BACKEND_UNREACHABLE_FALLBACK: &str =
    "Something went wrong while contacting the AI backend. Please check if the server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub origin: Origin,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Assistant,
            text: text.into(),
        }
    }
}

/// Request issued by [`ChatSession::submit`], to be handed back to
/// [`ChatSession::resolve`] once the backend answers.
#[derive(Debug)]
#[must_use = "a pending chat must be resolved or the session stays busy"]
pub struct PendingChat {
    generation: Uuid,
    request: ChatRequest,
}

impl PendingChat {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct ChatSession {
    generation: Uuid,
    transcript: Vec<ChatTurn>,
    input: String,
    sending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            generation: Uuid::new_v4(),
            transcript: vec![ChatTurn::assistant(ONBOARDING_MESSAGE)],
            input: String::new(),
            sending: false,
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn last_turn(&self) -> Option<&ChatTurn> {
        self.transcript.last()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append the user turn and return the request to send.
    ///
    /// Blank input or a request already in flight leaves the session untouched.
    pub fn submit(
        &mut self,
        text: &str,
        resume_context: &ResumeContext,
    ) -> Result<PendingChat, InputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyMessage);
        }
        if self.sending {
            debug!("Chat submission rejected, request in flight");
            return Err(InputError::RequestPending);
        }

        self.transcript.push(ChatTurn::user(trimmed));
        self.input.clear();
        self.sending = true;

        Ok(PendingChat {
            generation: self.generation,
            request: ChatRequest {
                message: trimmed.to_string(),
                resume_text: resume_context.as_str().to_string(),
            },
        })
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self, resume_context: &ResumeContext) -> Result<PendingChat, InputError> {
        let text = self.input.clone();
        self.submit(&text, resume_context)
    }

    /// Append the assistant turn for `pending`.
    ///
    /// Returns `false` when the request belongs to a session that has since
    /// been reset; nothing is written in that case.
    pub fn resolve(&mut self, pending: PendingChat, outcome: anyhow::Result<ChatReply>) -> bool {
        self.append_reply(pending, reply_turn(outcome))
    }

    fn append_reply(&mut self, pending: PendingChat, turn: ChatTurn) -> bool {
        if pending.generation != self.generation {
            debug!("Dropping chat reply for a closed session");
            return false;
        }
        self.transcript.push(turn);
        self.sending = false;
        true
    }

    /// Give up on `pending` without a reply. The user turn stays, the
    /// session accepts new submissions again.
    pub fn abandon(&mut self, pending: PendingChat) {
        if pending.generation == self.generation {
            debug!("Chat request abandoned");
            self.sending = false;
        }
    }

    /// Send `pending` to the backend and append the assistant turn.
    ///
    /// Dropping the returned future before it completes abandons the request.
    pub async fn complete<B: ChatBackend>(&mut self, backend: &B, pending: PendingChat) -> ChatTurn {
        let mut in_flight = InFlight {
            session: self,
            pending: Some(pending),
        };
        let outcome = match &in_flight.pending {
            Some(pending) => backend.send_chat(pending.request()).await,
            None => Err(anyhow::anyhow!("chat request already settled")),
        };
        let turn = reply_turn(outcome);
        if let Some(pending) = in_flight.pending.take() {
            in_flight.session.append_reply(pending, turn.clone());
        }
        turn
    }

    /// Submit, wait for the backend, resolve. Returns the assistant turn.
    pub async fn ask<B: ChatBackend>(
        &mut self,
        backend: &B,
        text: &str,
        resume_context: &ResumeContext,
    ) -> Result<ChatTurn, InputError> {
        let pending = self.submit(text, resume_context)?;
        Ok(self.complete(backend, pending).await)
    }

    /// Start over, as when the chat page is left and reopened.
    /// Replies still in flight for the old session are discarded on arrival.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Clears the busy flag if a request is dropped mid-flight
struct InFlight<'a> {
    session: &'a mut ChatSession,
    pending: Option<PendingChat>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.session.abandon(pending);
        }
    }
}

fn reply_turn(outcome: anyhow::Result<ChatReply>) -> ChatTurn {
    match outcome {
        Ok(reply) if !reply.reply.trim().is_empty() => ChatTurn::assistant(reply.reply),
        Ok(_) => ChatTurn::assistant(EMPTY_REPLY_FALLBACK),
        Err(e) => {
            warn!("Chat request failed: {:#}", e);
            ChatTurn::assistant(BACKEND_UNREACHABLE_FALLBACK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    /// Answers every request with a fixed reply, or fails when `reply` is `None`.
    struct ScriptedBackend {
        reply: Option<String>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl ChatBackend for ScriptedBackend {
        fn send_chat(
            &self,
            request: &ChatRequest,
        ) -> impl Future<Output = anyhow::Result<ChatReply>> + Send {
            self.seen.lock().unwrap().push(request.clone());
            let reply = self.reply.clone();
            async move {
                match reply {
                    Some(reply) => Ok(ChatReply { reply }),
                    None => Err(anyhow::anyhow!("connection refused")),
                }
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let session = ChatSession::new();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].origin, Origin::Assistant);
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let backend = ScriptedBackend::replying("unused");
        let mut session = ChatSession::new();

        let result = session.ask(&backend, "   \n\t", &ResumeContext::default()).await;
        assert!(matches!(result, Err(InputError::EmptyMessage)));
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_user_turn_appended_before_reply() {
        let mut session = ChatSession::new();
        session.set_input("  Rate my resume  ");

        let pending = session.submit_input(&ResumeContext::default()).unwrap();
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1], ChatTurn::user("Rate my resume"));
        assert_eq!(session.input(), "");
        assert!(session.is_sending());
        assert_eq!(pending.request().message, "Rate my resume");
        assert_eq!(pending.request().resume_text, "");
    }

    #[test]
    fn test_second_submission_rejected_while_pending() {
        let mut session = ChatSession::new();
        let context = ResumeContext::default();

        let pending = session.submit("Rate my resume", &context).unwrap();
        session.set_input("And my cover letter?");
        assert!(matches!(
            session.submit_input(&context),
            Err(InputError::RequestPending)
        ));
        // The rejected text stays in the buffer for a later resend.
        assert_eq!(session.input(), "And my cover letter?");

        assert!(session.resolve(pending, Ok(ChatReply { reply: "Sure, upload it.".to_string() })));

        let texts: Vec<(Origin, &str)> = session
            .transcript()
            .iter()
            .skip(1)
            .map(|turn| (turn.origin, turn.text.as_str()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (Origin::User, "Rate my resume"),
                (Origin::Assistant, "Sure, upload it."),
            ]
        );
        assert!(!session.is_sending());
        assert!(session.submit_input(&context).is_ok());
    }

    #[tokio::test]
    async fn test_successful_reply() {
        let backend = ScriptedBackend::replying("Sure, upload it.");
        let mut session = ChatSession::new();

        let turn = session
            .ask(&backend, "Rate my resume", &ResumeContext::default())
            .await
            .unwrap();
        assert_eq!(turn, ChatTurn::assistant("Sure, upload it."));
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let backend = ScriptedBackend::failing();
        let mut session = ChatSession::new();
        let before = session.transcript().len();

        session
            .ask(&backend, "Rate my resume", &ResumeContext::default())
            .await
            .unwrap();
        assert_eq!(session.transcript().len(), before + 2);
        assert_eq!(
            session.last_turn(),
            Some(&ChatTurn::assistant(BACKEND_UNREACHABLE_FALLBACK))
        );
        assert!(!session.is_sending());
    }

    #[tokio::test]
    async fn test_blank_reply_uses_fallback() {
        let backend = ScriptedBackend::replying("  ");
        let mut session = ChatSession::new();

        session
            .ask(&backend, "Hello", &ResumeContext::default())
            .await
            .unwrap();
        assert_eq!(
            session.last_turn(),
            Some(&ChatTurn::assistant(EMPTY_REPLY_FALLBACK))
        );
    }

    #[tokio::test]
    async fn test_resume_context_forwarded() {
        let backend = ScriptedBackend::replying("ok");
        let mut session = ChatSession::new();
        let context = ResumeContext::from_extracted(&crate::types::ExtractedData {
            skills: vec!["Go".to_string(), "SQL".to_string()],
            summary: "Backend dev".to_string(),
            projects: String::new(),
        });

        session.ask(&backend, "Which roles fit me?", &context).await.unwrap();
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].resume_text, "Skills: Go, SQL | Summary: Backend dev");
    }

    /// Never answers
    struct SilentBackend;

    impl ChatBackend for SilentBackend {
        fn send_chat(
            &self,
            _request: &ChatRequest,
        ) -> impl Future<Output = anyhow::Result<ChatReply>> + Send {
            std::future::pending()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_request_frees_the_session() {
        let mut session = ChatSession::new();
        let context = ResumeContext::default();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            session.ask(&SilentBackend, "Hello?", &context),
        )
        .await;
        assert!(timed_out.is_err());

        assert!(!session.is_sending());
        assert_eq!(session.last_turn(), Some(&ChatTurn::user("Hello?")));
        let backend = ScriptedBackend::replying("Hi!");
        let turn = session.ask(&backend, "Hello again", &context).await.unwrap();
        assert_eq!(turn, ChatTurn::assistant("Hi!"));
    }

    #[test]
    fn test_abandon_only_touches_current_generation() {
        let mut session = ChatSession::new();
        let context = ResumeContext::default();

        let pending = session.submit("Hello", &context).unwrap();
        session.abandon(pending);
        assert!(!session.is_sending());

        let stale = session.submit("Again", &context).unwrap();
        session.reset();
        let _current = session.submit("Fresh start", &context).unwrap();
        session.abandon(stale);
        assert!(session.is_sending());
    }

    #[test]
    fn test_late_reply_after_reset_is_dropped() {
        let mut session = ChatSession::new();
        let pending = session.submit("Hello", &ResumeContext::default()).unwrap();

        session.reset();
        assert!(!session.resolve(pending, Ok(ChatReply { reply: "late".to_string() })));
        assert_eq!(session.transcript().len(), 1);
        assert!(!session.is_sending());
    }
}
