// src/display/model.rs
//! Display-ready views derived from backend analysis payloads.

use super::band::{display_score, ScoreBand};
use super::skills::SkillGap;
use crate::types::{AnalysisResult, JobMatchResult, ScoreInsights};
use crate::utils::humanize_key;

pub const NO_ISSUES: &str = "No major issues detected.";
pub const NO_IMPROVEMENTS: &str = "Great job! Keep it up.";
pub const NO_RECOMMENDATIONS: &str = "No specific recommendations.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreView {
    pub value: u32,
    pub band: ScoreBand,
}

impl ScoreView {
    pub fn new(score: f64) -> Self {
        let value = display_score(score);
        Self {
            value,
            band: ScoreBand::from_score(value as f64),
        }
    }

    pub fn color(&self) -> &'static str {
        self.band.color()
    }
}

impl Default for ScoreView {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub name: String,
    pub title: String,
    pub score: ScoreView,
    pub issues: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeDisplay {
    pub overall: ScoreView,
    pub sections: Vec<SectionView>,
    pub skills: Vec<String>,
}

impl ResumeDisplay {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.overall.value == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobMatchDisplay {
    pub score: ScoreView,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub gap: SkillGap,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsightsDisplay {
    pub score: ScoreView,
    pub strengths: Vec<String>,
    pub drawbacks: Vec<String>,
    pub improvements: Vec<String>,
}

/// An absent result renders as the empty model.
pub fn derive_resume_display(result: Option<&AnalysisResult>) -> ResumeDisplay {
    let Some(result) = result else {
        return ResumeDisplay::default();
    };

    let sections = result
        .sections
        .iter()
        .map(|section| SectionView {
            name: section.name.clone(),
            title: humanize_key(&section.name),
            score: ScoreView::new(section.result.score),
            issues: section.result.issues.clone(),
            improvements: section.result.improvements.clone(),
        })
        .collect();

    ResumeDisplay {
        overall: ScoreView::new(result.overall_score),
        sections,
        skills: result.extracted_data.skills.clone(),
    }
}

pub fn derive_job_match_display(result: Option<&JobMatchResult>) -> JobMatchDisplay {
    let Some(result) = result else {
        return JobMatchDisplay::default();
    };

    JobMatchDisplay {
        score: ScoreView::new(result.match_score),
        matched_skills: result.matched_skills.clone(),
        missing_skills: result.missing_skills.clone(),
        gap: SkillGap::from_counts(result.matched_skills.len(), result.missing_skills.len()),
        recommendations: result.recommendations.clone(),
    }
}

pub fn derive_insights_display(insights: Option<&ScoreInsights>) -> InsightsDisplay {
    let Some(insights) = insights else {
        return InsightsDisplay::default();
    };

    InsightsDisplay {
        score: ScoreView::new(insights.ats_score),
        strengths: insights.strengths.clone(),
        drawbacks: insights.drawbacks.clone(),
        improvements: insights.improvements.clone(),
    }
}
