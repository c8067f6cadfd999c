// src/render.rs
//! Plain-text rendering of display models for the terminal front end

use std::fmt::Write;

use crate::activity::format_timestamp;
use crate::chat::{ChatTurn, Origin};
use crate::display::model::{NO_IMPROVEMENTS, NO_ISSUES, NO_RECOMMENDATIONS};
use crate::display::{InsightsDisplay, JobMatchDisplay, ResumeDisplay, ScoreBand};
use crate::types::{ActivityRecord, ChatHistoryEntry};

const BAR_WIDTH: usize = 30;

pub fn progress_bar(value: u32, width: usize) -> String {
    let filled = (value.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn score_line(label: &str, value: u32) -> String {
    let band = ScoreBand::from_score(value as f64);
    format!(
        "{}: {:>3}/100 {} {}",
        label,
        value,
        progress_bar(value, BAR_WIDTH),
        band.label()
    )
}

pub fn band_legend() -> String {
    ScoreBand::ALL
        .iter()
        .map(|band| band.legend())
        .collect::<Vec<_>>()
        .join("  ")
}

fn bullet_list(out: &mut String, heading: &str, items: &[String], empty: &str) {
    let _ = writeln!(out, "  {}", heading);
    if items.is_empty() {
        let _ = writeln!(out, "    {}", empty);
    }
    for item in items {
        let _ = writeln!(out, "    - {}", item);
    }
}

pub fn render_resume(display: &ResumeDisplay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", band_legend());
    if !display.skills.is_empty() {
        let _ = writeln!(out, "Detected skills: {}", display.skills.join(", "));
    }

    for section in &display.sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", score_line(&section.title, section.score.value));
        bullet_list(&mut out, "What to improve:", &section.issues, NO_ISSUES);
        bullet_list(&mut out, "How to improve:", &section.improvements, NO_IMPROVEMENTS);
    }
    out
}

pub fn render_job_match(display: &JobMatchDisplay) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Skills: {}% matched, {}% missing",
        display.gap.matched_pct, display.gap.missing_pct
    );
    bullet_list(&mut out, "Matched skills:", &display.matched_skills, "None found.");
    bullet_list(&mut out, "Missing skills:", &display.missing_skills, "None missing.");
    bullet_list(
        &mut out,
        "Recommendations:",
        &display.recommendations,
        NO_RECOMMENDATIONS,
    );
    out
}

pub fn render_insights(display: &InsightsDisplay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", score_line("ATS Score", display.score.value));
    bullet_list(&mut out, "Strengths:", &display.strengths, "None listed.");
    bullet_list(&mut out, "Drawbacks:", &display.drawbacks, "None listed.");
    bullet_list(&mut out, "Improvements:", &display.improvements, "None listed.");
    out
}

pub fn render_activity(records: &[ActivityRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{:<12} {:<16} {}",
            record.event.tag,
            format_timestamp(&record.timestamp),
            record.event.title
        );
        if !record.event.detail.is_empty() {
            let _ = writeln!(out, "{:<12} {}", "", record.event.detail);
        }
    }
    out
}

pub fn render_turn(turn: &ChatTurn) -> String {
    let speaker = match turn.origin {
        Origin::User => "you",
        Origin::Assistant => "truefit",
    };
    format!("{}> {}", speaker, turn.text)
}

pub fn render_history(entries: &[ChatHistoryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "[{}] {}> {}",
            format_timestamp(&entry.timestamp),
            entry.role,
            entry.message
        );
    }
    out
}
