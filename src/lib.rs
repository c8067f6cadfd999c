// src/lib.rs
//! Client for the TrueFit résumé analysis, job matching and career chat API

pub mod activity;
pub mod chat;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod pages;
pub mod render;
pub mod routes;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use activity::ActivityRecorder;
pub use chat::{ChatBackend, ChatSession, ChatTurn, ResumeContext};
pub use config::ClientConfig;
pub use crate::core::{ResumeUpload, ServiceClient};
pub use display::{AnimationSlot, ScoreAnimation, ScoreBand, SkillGap};
pub use error::InputError;
pub use routes::Route;
