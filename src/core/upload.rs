// src/core/upload.rs
//! Résumé files validated for upload: PDF or DOCX, at most 5 MB.

use anyhow::{Context, Result};
use reqwest::multipart::Part;
use std::path::Path;

use crate::error::InputError;
use crate::utils::validate_file_extension;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Clone)]
pub struct ResumeUpload {
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl ResumeUpload {
    /// Read and validate a résumé from disk. No network access.
    pub async fn load(path: &Path) -> Result<Self, InputError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let content_type = content_type_for(&file_name)?;

        let unreadable = |source: std::io::Error| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
        check_size(&file_name, metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        // The file may have grown between the two calls.
        check_size(&file_name, bytes.len() as u64)?;

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, InputError> {
        let content_type = content_type_for(file_name)?;
        check_size(file_name, bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.to_string(),
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Multipart part carrying the file, ready to attach to a form
    pub fn to_part(&self) -> Result<Part> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(self.content_type)
            .context("Failed to create multipart")
    }
}

/// Get content type for file
pub fn content_type_for(file_name: &str) -> Result<&'static str, InputError> {
    match validate_file_extension(file_name, ALLOWED_EXTENSIONS)?.as_str() {
        "pdf" => Ok("application/pdf"),
        _ => Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    }
}

fn check_size(file_name: &str, size: u64) -> Result<(), InputError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(InputError::FileTooLarge {
            name: file_name.to_string(),
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}
