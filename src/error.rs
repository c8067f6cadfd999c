// src/error.rs
//! Input validation errors, raised before any request leaves the client.
//!
//! Backend and transport failures are `anyhow::Error`s and never reach the
//! UI layer: page controllers turn them into fallback state.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("a chat request is already in flight")]
    RequestPending,

    #[error("please upload your resume first")]
    MissingFile,

    #[error("resume text is empty")]
    EmptyResumeText,

    #[error("please provide both a job description and a resume")]
    MissingJobDescription,

    #[error("unsupported file format: {0} (use PDF or DOCX)")]
    UnsupportedFormat(String),

    #[error("{name} is {size} bytes, the limit is {limit} bytes")]
    FileTooLarge { name: String, size: u64, limit: u64 },

    #[error("failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
