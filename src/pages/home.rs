// src/pages/home.rs
use crate::activity::ActivityRecorder;
use crate::routes::Route;
use crate::types::ActivityRecord;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Fast Resume Analysis",
        description: "Upload a resume and get instant ATS score, strengths and weak spots.",
        route: Route::MatchScore,
    },
    Feature {
        title: "Smart Job Matching",
        description: "Compare any job description with your resume - see a match % and gaps.",
        route: Route::JobMatch,
    },
    Feature {
        title: "AI Career Chat",
        description: "Ask the assistant what to learn and how to improve your profile.",
        route: Route::CareerChat,
    },
];

#[derive(Debug)]
pub struct HomePage {
    recorder: ActivityRecorder,
    activity: Vec<ActivityRecord>,
}

impl HomePage {
    pub const ROUTE: Route = Route::Home;

    pub fn new(recorder: ActivityRecorder) -> Self {
        Self {
            recorder,
            activity: Vec::new(),
        }
    }

    /// Refresh the feed. Never empty afterwards.
    pub async fn load(&mut self) -> &[ActivityRecord] {
        self.activity = self.recorder.recent().await;
        &self.activity
    }

    pub fn activity(&self) -> &[ActivityRecord] {
        &self.activity
    }
}
