// src/pages/career_chat.rs
//! Career assistant chat grounded in an uploaded résumé

use std::path::Path;
use tracing::{error, info};

use crate::activity::ActivityRecorder;
use crate::chat::{ChatSession, ChatTurn, ResumeContext};
use crate::core::{ResumeUpload, ServiceClient};
use crate::error::InputError;
use crate::routes::Route;
use crate::types::{ActivityEvent, ExtractedData};

pub const RESUME_ANALYSIS_FAILED: &str = "Failed to analyze resume. Please try again.";

#[derive(Debug)]
pub struct CareerChatPage {
    client: ServiceClient,
    recorder: ActivityRecorder,
    session: ChatSession,
    resume_context: ResumeContext,
    extracted: Option<ExtractedData>,
    notice: Option<String>,
}

impl CareerChatPage {
    pub const ROUTE: Route = Route::CareerChat;

    pub fn new(client: ServiceClient, recorder: ActivityRecorder) -> Self {
        Self {
            client,
            recorder,
            session: ChatSession::new(),
            resume_context: ResumeContext::default(),
            extracted: None,
            notice: None,
        }
    }

    /// Analyze a résumé and use its extracted data as chat context.
    /// The previous context is dropped first, whatever the outcome.
    pub async fn upload_resume(&mut self, path: &Path) -> Result<(), InputError> {
        self.resume_context.clear();
        self.extracted = None;
        self.notice = None;

        let upload = ResumeUpload::load(path).await?;
        match self.client.analyze_resume(&upload).await {
            Ok(result) => {
                self.resume_context = ResumeContext::from_extracted(&result.extracted_data);
                info!(
                    "Resume context ready ({} skills, {} chars)",
                    result.extracted_data.skills.len(),
                    self.resume_context.as_str().len()
                );
                self.extracted = Some(result.extracted_data);
            }
            Err(e) => {
                error!("Resume analysis for chat failed: {:#}", e);
                self.notice = Some(RESUME_ANALYSIS_FAILED.to_string());
            }
        }
        Ok(())
    }

    /// Send one message and wait for the assistant's turn.
    /// The activity is recorded as soon as the message is accepted.
    pub async fn send(&mut self, text: &str) -> Result<ChatTurn, InputError> {
        let pending = self.session.submit(text, &self.resume_context)?;
        self.recorder.record(ActivityEvent::chat_sent(text));
        Ok(self.session.complete(&self.client, pending).await)
    }

    /// Leave and reopen the page
    pub fn reset(&mut self) {
        self.session.reset();
        self.resume_context.clear();
        self.extracted = None;
        self.notice = None;
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn resume_context(&self) -> &ResumeContext {
        &self.resume_context
    }

    pub fn extracted(&self) -> Option<&ExtractedData> {
        self.extracted.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn placeholder(&self) -> &'static str {
        if self.resume_context.is_empty() {
            "You can start by asking about roles or upload a resume..."
        } else {
            "Ask about a role, missing skills, roadmap..."
        }
    }
}
