// src/types/mod.rs
//! Backend payload types

pub mod lenient;
pub mod response;

pub use response::{
    ActivityEvent, ActivityRecord, AnalysisResult, ChatHistoryEntry, ChatReply, ChatRequest,
    ExtractedData, JobMatchResult, ScoreInsights, ScoreInsightsRequest, Section, SectionResult,
    StatusResponse,
};
