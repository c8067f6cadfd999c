// src/display/mod.rs
//! Analysis result rendering: score bands, skill-gap shares, animated scores

pub mod animation;
pub mod band;
pub mod model;
pub mod skills;

pub use animation::{AnimationSlot, Frame, Frames, ScoreAnimation};
pub use band::{clamp_score, display_score, ScoreBand};
pub use model::{
    derive_insights_display, derive_job_match_display, derive_resume_display, InsightsDisplay,
    JobMatchDisplay, ResumeDisplay, ScoreView, SectionView,
};
pub use skills::SkillGap;
