// src/chat/context.rs
use std::fmt;

use crate::types::ExtractedData;

const DELIMITER: &str = " | ";

/// Résumé summary threaded into every chat request.
///
/// Built as `Skills: .. | Summary: .. | Projects: ..`, in that order,
/// skipping parts that are absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeContext(String);

impl ResumeContext {
    pub fn from_extracted(data: &ExtractedData) -> Self {
        let skills: Vec<&str> = data
            .skills
            .iter()
            .map(|skill| skill.trim())
            .filter(|skill| !skill.is_empty())
            .collect();

        let mut parts = Vec::with_capacity(3);
        if !skills.is_empty() {
            parts.push(format!("Skills: {}", skills.join(", ")));
        }
        if !data.summary.trim().is_empty() {
            parts.push(format!("Summary: {}", data.summary.trim()));
        }
        if !data.projects.trim().is_empty() {
            parts.push(format!("Projects: {}", data.projects.trim()));
        }

        Self(parts.join(DELIMITER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for ResumeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(skills: &[&str], summary: &str, projects: &str) -> ExtractedData {
        ExtractedData {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            summary: summary.to_string(),
            projects: projects.to_string(),
        }
    }

    #[test]
    fn test_empty_projects_omitted() {
        let context = ResumeContext::from_extracted(&extracted(&["Go", "SQL"], "Backend dev", ""));
        assert_eq!(context.as_str(), "Skills: Go, SQL | Summary: Backend dev");
    }

    #[test]
    fn test_all_parts_in_order() {
        let context = ResumeContext::from_extracted(&extracted(
            &["Rust"],
            "Systems engineer",
            "Key-value store",
        ));
        assert_eq!(
            context.as_str(),
            "Skills: Rust | Summary: Systems engineer | Projects: Key-value store"
        );
    }

    #[test]
    fn test_only_projects() {
        let context = ResumeContext::from_extracted(&extracted(&[], "  ", "Compiler"));
        assert_eq!(context.as_str(), "Projects: Compiler");
    }

    #[test]
    fn test_nothing_extracted() {
        let context = ResumeContext::from_extracted(&ExtractedData::default());
        assert!(context.is_empty());
    }
}
