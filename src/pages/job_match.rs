// src/pages/job_match.rs
//! Compare a résumé with a pasted job description

use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::activity::ActivityRecorder;
use crate::core::{ResumeUpload, ServiceClient};
use crate::display::{derive_job_match_display, AnimationSlot, JobMatchDisplay};
use crate::error::InputError;
use crate::routes::Route;
use crate::types::{ActivityEvent, JobMatchResult};

pub const MATCH_FAILED: &str = "Something went wrong with the AI analysis.";

#[derive(Debug)]
pub struct JobMatchPage {
    client: ServiceClient,
    recorder: ActivityRecorder,
    job_description: String,
    resume_file: Option<PathBuf>,
    result: Option<JobMatchResult>,
    display: JobMatchDisplay,
    notice: Option<String>,
    score: AnimationSlot,
}

impl JobMatchPage {
    pub const ROUTE: Route = Route::JobMatch;

    pub fn new(client: ServiceClient, recorder: ActivityRecorder) -> Self {
        Self {
            client,
            recorder,
            job_description: String::new(),
            resume_file: None,
            result: None,
            display: JobMatchDisplay::default(),
            notice: None,
            score: AnimationSlot::new(),
        }
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn select_file(&mut self, path: &Path) {
        self.resume_file = Some(path.to_path_buf());
    }

    pub async fn compare(&mut self) -> Result<&JobMatchDisplay, InputError> {
        let job_description = self.job_description.trim().to_string();
        let path = match (&self.resume_file, job_description.is_empty()) {
            (Some(path), false) => path.clone(),
            _ => return Err(InputError::MissingJobDescription),
        };
        let upload = ResumeUpload::load(&path).await?;

        self.result = None;
        self.display = JobMatchDisplay::default();
        self.notice = None;
        self.score.reset();

        match self.client.match_job_file(&job_description, &upload).await {
            Ok(result) => {
                info!(
                    "Job match: {} ({} matched, {} missing)",
                    result.match_score,
                    result.matched_skills.len(),
                    result.missing_skills.len()
                );
                self.recorder.record(ActivityEvent::job_compared());
                self.display = derive_job_match_display(Some(&result));
                self.score.animate_to(self.display.score.value);
                self.result = Some(result);
            }
            Err(e) => {
                error!("Job match failed: {:#}", e);
                self.notice = Some(MATCH_FAILED.to_string());
            }
        }

        Ok(&self.display)
    }

    pub fn display(&self) -> &JobMatchDisplay {
        &self.display
    }

    pub fn result(&self) -> Option<&JobMatchResult> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn score_slot(&mut self) -> &mut AnimationSlot {
        &mut self.score
    }
}
