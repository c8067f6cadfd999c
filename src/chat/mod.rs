// src/chat/mod.rs
//! Career chat: session transcript and résumé context

use std::future::Future;

use crate::core::ServiceClient;
use crate::types::{ChatReply, ChatRequest};

pub mod context;
pub mod session;

pub use context::ResumeContext;
pub use session::{ChatSession, ChatTurn, Origin, PendingChat};

/// Where chat requests go. The service client is the real one.
pub trait ChatBackend {
    fn send_chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = anyhow::Result<ChatReply>> + Send;
}

impl ChatBackend for ServiceClient {
    fn send_chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = anyhow::Result<ChatReply>> + Send {
        self.chat(request)
    }
}
