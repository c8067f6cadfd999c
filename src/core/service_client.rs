// src/core/service_client.rs
//! HTTP client for the TrueFit backend - one method per endpoint

use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, trace};

use crate::config::ClientConfig;
use crate::core::upload::ResumeUpload;
use crate::types::{
    lenient, ActivityEvent, ActivityRecord, AnalysisResult, ChatHistoryEntry, ChatReply,
    ChatRequest, JobMatchResult, ScoreInsights, ScoreInsightsRequest, StatusResponse,
};

const ANALYZE_ENDPOINT: &str = "/api/resume/analyze";
const MATCH_FILE_ENDPOINT: &str = "/api/job/match-file";
const CHAT_ENDPOINT: &str = "/api/ai/chat";
const CHAT_HISTORY_ENDPOINT: &str = "/api/ai/history";
const SCORE_INSIGHTS_ENDPOINT: &str = "/api/ai/score-insights";
const ACTIVITY_ENDPOINT: &str = "/api/activity/";
const HEALTH_ENDPOINT: &str = "/api/health";

#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.api_base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Résumé analysis - sends the file, receives scores and extracted data
    pub async fn analyze_resume(&self, upload: &ResumeUpload) -> Result<AnalysisResult> {
        let url = self.url(ANALYZE_ENDPOINT);
        let form = Form::new().part("file", upload.to_part()?);

        info!("Calling resume analysis: {} ({})", url, upload.file_name());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to call resume analysis")?;

        Self::read_lenient(response).await
    }

    /// Job matching - sends the job description and the résumé file
    pub async fn match_job_file(
        &self,
        job_description: &str,
        upload: &ResumeUpload,
    ) -> Result<JobMatchResult> {
        let url = self.url(MATCH_FILE_ENDPOINT);
        let form = Form::new()
            .text("job_description", job_description.to_string())
            .part("resume_file", upload.to_part()?);

        info!("Calling job matching: {} ({})", url, upload.file_name());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("Failed to call job matching")?;

        Self::read_lenient(response).await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        info!(
            "Calling AI chat ({} chars, context {} chars)",
            request.message.len(),
            request.resume_text.len()
        );
        self.post_json(CHAT_ENDPOINT, request).await
    }

    pub async fn chat_history(&self) -> Result<Vec<ChatHistoryEntry>> {
        self.get(CHAT_HISTORY_ENDPOINT).await
    }

    pub async fn clear_chat_history(&self) -> Result<StatusResponse> {
        let url = self.url(CHAT_HISTORY_ENDPOINT);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", url))?;

        Self::read_lenient(response).await
    }

    pub async fn score_insights(&self, resume_text: &str) -> Result<ScoreInsights> {
        let payload = ScoreInsightsRequest {
            resume_text: resume_text.to_string(),
        };
        self.post_json(SCORE_INSIGHTS_ENDPOINT, &payload).await
    }

    pub async fn list_activities(&self) -> Result<Vec<ActivityRecord>> {
        self.get(ACTIVITY_ENDPOINT).await
    }

    /// Post one activity; the response body is ignored
    pub async fn record_activity(&self, event: &ActivityEvent) -> Result<()> {
        let url = self.url(ACTIVITY_ENDPOINT);
        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        let status = response.status();
        trace!("Activity response status: {}", status);
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
        Ok(())
    }

    pub async fn health(&self) -> Result<StatusResponse> {
        self.get(HEALTH_ENDPOINT).await
    }

    /// Generic POST request with JSON
    pub async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: serde::Serialize,
        R: serde::de::DeserializeOwned + Default,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("Failed to POST to {}", url))?;

        Self::read_lenient(response).await
    }

    /// Generic GET request
    pub async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: serde::de::DeserializeOwned + Default,
    {
        let url = self.url(endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        Self::read_lenient(response).await
    }

    /// Fail on non-2xx status; otherwise decode leniently.
    ///
    /// A body that is not JSON at all is still an error: the backend did not
    /// answer the way any version of it does.
    async fn read_lenient<R>(response: Response) -> Result<R>
    where
        R: serde::de::DeserializeOwned + Default,
    {
        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }

        let body = response
            .text()
            .await
            .context("Failed to read response text")?;
        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("Response is not JSON: {}", body))?;

        Ok(lenient::from_value(value))
    }
}
