// src/pages/mod.rs
//! Page controllers. Each owns the state of one task and turns backend
//! failures into a notice instead of an error.

pub mod career_chat;
pub mod home;
pub mod job_match;
pub mod match_score;

pub use career_chat::CareerChatPage;
pub use home::HomePage;
pub use job_match::JobMatchPage;
pub use match_score::MatchScorePage;
