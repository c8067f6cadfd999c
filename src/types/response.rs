// src/types/response.rs
use serde::{Deserialize, Serialize};

use super::lenient;

// ===== Resume Analysis =====

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionResult {
    #[serde(default, deserialize_with = "lenient::score")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    pub name: String,
    pub result: SectionResult,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtractedData {
    #[serde(default, deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub projects: String,
}

/// Response of `POST /api/resume/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient::score")]
    pub overall_score: f64,
    #[serde(default, deserialize_with = "lenient::sections")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub extracted_data: ExtractedData,
    /// Set when the backend could not read the file at all.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub error: Option<String>,
}

// ===== Job Matching =====

/// Response of `POST /api/job/match-file`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobMatchResult {
    #[serde(default, deserialize_with = "lenient::score")]
    pub match_score: f64,
    #[serde(default, deserialize_with = "lenient::string_set")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_set")]
    pub missing_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub recommendations: Vec<String>,
}

// ===== AI Chat =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "lenient::text")]
    pub reply: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatHistoryEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreInsightsRequest {
    pub resume_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScoreInsights {
    #[serde(default, deserialize_with = "lenient::score")]
    pub ats_score: f64,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub drawbacks: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub improvements: Vec<String>,
}

// ===== Activity =====

/// One user action, as posted to `POST /api/activity/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub tag: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub detail: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub route: String,
}

/// An activity as stored by the backend, returned by `GET /api/activity/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timestamp: String,
    #[serde(flatten)]
    pub event: ActivityEvent,
}

// ===== Misc =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
}

impl StatusResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "success" | "cleared")
    }
}
