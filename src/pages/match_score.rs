// src/pages/match_score.rs
//! ATS analysis of one résumé with an animated overall score

use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::core::{ResumeUpload, ServiceClient};
use crate::display::{derive_resume_display, AnimationSlot, ResumeDisplay};
use crate::error::InputError;
use crate::routes::Route;
use crate::types::AnalysisResult;

pub const ANALYSIS_FAILED: &str = "Failed to analyze resume";

#[derive(Debug)]
pub struct MatchScorePage {
    client: ServiceClient,
    file: Option<PathBuf>,
    result: Option<AnalysisResult>,
    display: ResumeDisplay,
    notice: Option<String>,
    score: AnimationSlot,
    loading: bool,
}

impl MatchScorePage {
    pub const ROUTE: Route = Route::MatchScore;

    pub fn new(client: ServiceClient) -> Self {
        Self {
            client,
            file: None,
            result: None,
            display: ResumeDisplay::default(),
            notice: None,
            score: AnimationSlot::new(),
            loading: false,
        }
    }

    pub fn select_file(&mut self, path: &Path) {
        self.file = Some(path.to_path_buf());
    }

    /// Upload the selected résumé and render the result.
    ///
    /// Input problems are returned; backend failures are not, they leave an
    /// empty display and a notice.
    pub async fn analyze(&mut self) -> Result<&ResumeDisplay, InputError> {
        let path = self.file.clone().ok_or(InputError::MissingFile)?;
        let upload = ResumeUpload::load(&path).await?;

        self.loading = true;
        self.result = None;
        self.display = ResumeDisplay::default();
        self.notice = None;
        self.score.reset();

        match self.client.analyze_resume(&upload).await {
            Ok(result) => {
                info!(
                    "Resume analysis: overall {} across {} sections",
                    result.overall_score,
                    result.sections.len()
                );
                if let Some(message) = &result.error {
                    self.notice = Some(message.clone());
                }
                self.display = derive_resume_display(Some(&result));
                self.score.animate_to(self.display.overall.value);
                self.result = Some(result);
            }
            Err(e) => {
                error!("Resume analysis failed: {:#}", e);
                self.notice = Some(ANALYSIS_FAILED.to_string());
            }
        }

        self.loading = false;
        Ok(&self.display)
    }

    pub fn display(&self) -> &ResumeDisplay {
        &self.display
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn score_slot(&mut self) -> &mut AnimationSlot {
        &mut self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{resume_file, unreachable_client, LocalBackend};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_requires_a_file() {
        let mut page = MatchScorePage::new(unreachable_client());
        assert!(matches!(page.analyze().await, Err(InputError::MissingFile)));
        assert!(page.notice().is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let mut page = MatchScorePage::new(unreachable_client());
        page.select_file(&path);
        let display = page.analyze().await.unwrap();
        assert!(display.is_empty());
        assert_eq!(page.notice(), Some(ANALYSIS_FAILED));
        assert!(page.result().is_none());
        assert!(!page.is_loading());
        assert_eq!(page.score_slot().current(), 0);
    }

    #[tokio::test]
    async fn test_successful_analysis_animates_score() {
        let backend = LocalBackend::start(|request| {
            assert_eq!(request.path, "/api/resume/analyze");
            assert!(request.body.contains("name=\"file\""));
            let body = json!({
                "overall_score": 78.6,
                "sections": {
                    "work_experience": { "score": 64, "issues": ["No metrics"] },
                    "skills": { "score": 90, "improvements": [] }
                },
                "extracted_data": { "skills": ["Rust", "SQL"] }
            });
            (200, body.to_string())
        })
        .await;
        let dir = tempfile::tempdir().unwrap();

        let mut page = MatchScorePage::new(backend.client());
        page.select_file(&resume_file(&dir));
        let display = page.analyze().await.unwrap();
        assert_eq!(display.overall.value, 78);
        assert_eq!(display.sections.len(), 2);
        assert_eq!(display.sections[0].title, "Work Experience");
        assert_eq!(display.skills, vec!["Rust", "SQL"]);
        assert!(page.notice().is_none());
        assert!(page.result().is_some());

        page.score_slot().finished().await;
        assert_eq!(page.score_slot().current(), 78);
    }

    #[tokio::test]
    async fn test_error_message_shown_with_partial_scores() {
        let backend = LocalBackend::start(|_| {
            let body = json!({ "error": "Could not extract all text", "overall_score": 40 });
            (200, body.to_string())
        })
        .await;
        let dir = tempfile::tempdir().unwrap();

        let mut page = MatchScorePage::new(backend.client());
        page.select_file(&resume_file(&dir));
        let display = page.analyze().await.unwrap();
        assert_eq!(display.overall.value, 40);
        assert_eq!(page.notice(), Some("Could not extract all text"));
    }

    #[tokio::test]
    async fn test_failed_rerun_clears_previous_score() {
        let calls = AtomicUsize::new(0);
        let backend = LocalBackend::start(move |_| match calls.fetch_add(1, Ordering::SeqCst) {
            0 => (200, json!({ "overall_score": 78 }).to_string()),
            _ => (500, json!({ "detail": "boom" }).to_string()),
        })
        .await;
        let dir = tempfile::tempdir().unwrap();

        let mut page = MatchScorePage::new(backend.client());
        page.select_file(&resume_file(&dir));
        page.analyze().await.unwrap();
        page.score_slot().finished().await;
        assert_eq!(page.score_slot().current(), 78);

        let mut rx = page.score_slot().subscribe();
        let display = page.analyze().await.unwrap();
        assert!(display.is_empty());
        assert_eq!(page.notice(), Some(ANALYSIS_FAILED));
        assert_eq!(page.score_slot().current(), 0);
        assert_eq!(*rx.borrow_and_update(), 0);
        assert!(!page.score_slot().is_running());
    }
}
