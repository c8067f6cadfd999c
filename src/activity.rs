// src/activity.rs
//! Fire-and-forget activity logging and the recent-activity feed.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::ServiceClient;
use crate::routes::Route;
use crate::types::{ActivityEvent, ActivityRecord};
use crate::utils::truncate_with_ellipsis;

const DETAIL_PREVIEW_CHARS: usize = 80;

impl ActivityEvent {
    pub fn chat_sent(message: &str) -> Self {
        let preview = truncate_with_ellipsis(message.trim(), DETAIL_PREVIEW_CHARS);
        Self {
            kind: "chat".to_string(),
            tag: "AI Chat".to_string(),
            title: "AI Chat".to_string(),
            detail: format!("Asked: \u{201c}{}\u{201d}", preview),
            route: Route::CareerChat.path().to_string(),
        }
    }

    pub fn job_compared() -> Self {
        Self {
            kind: "job".to_string(),
            tag: "Job Match".to_string(),
            title: "Job compared".to_string(),
            detail: "You compared your resume with a job role.".to_string(),
            route: Route::JobMatch.path().to_string(),
        }
    }
}

/// Shown when the backend has no activity or cannot be reached
pub fn welcome_record() -> ActivityRecord {
    ActivityRecord {
        id: "welcome-1".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        event: ActivityEvent {
            kind: "welcome".to_string(),
            tag: "Welcome".to_string(),
            title: "Welcome to TrueFit".to_string(),
            detail: "This represents your very first activity!".to_string(),
            route: Route::Home.path().to_string(),
        },
    }
}

#[derive(Debug, Clone)]
pub struct ActivityRecorder {
    client: ServiceClient,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl ActivityRecorder {
    pub fn new(client: ServiceClient) -> Self {
        Self {
            client,
            pending: Arc::default(),
        }
    }

    /// Post the event in the background. Failures are logged, never returned.
    pub fn record(&self, event: ActivityEvent) {
        let client = self.client.clone();
        let handle = tokio::spawn(async move {
            match client.record_activity(&event).await {
                Ok(()) => debug!("Recorded activity: {}", event.title),
                Err(e) => warn!("Could not save activity {}: {:#}", event.title, e),
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.retain(|task| !task.is_finished());
        pending.push(handle);
    }

    /// Wait for posts still in flight, e.g. before the process exits
    pub async fn flush(&self) {
        let handles = std::mem::take(&mut *self.pending.lock().unwrap_or_else(|p| p.into_inner()));
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Activity task did not complete: {}", e);
            }
        }
    }

    pub fn in_flight(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .filter(|task| !task.is_finished())
            .count()
    }

    /// Latest activity, newest first, or the welcome record
    pub async fn recent(&self) -> Vec<ActivityRecord> {
        match self.client.list_activities().await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                info!("No recorded activity yet");
                vec![welcome_record()]
            }
            Err(e) => {
                warn!("Could not load activity: {:#}", e);
                vec![welcome_record()]
            }
        }
    }
}

/// `HH:MM · Mon D` in the given zone. Zone-less timestamps are UTC.
pub fn format_timestamp_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    match parse_timestamp(raw) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M · %b %-d").to_string(),
        None => raw.to_string(),
    }
}

pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &chrono::Local)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
