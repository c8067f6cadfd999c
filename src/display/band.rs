// src/display/band.rs
use std::fmt;

/// Colour band of a 0-100 score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreBand {
    /// [0, 50)
    Critical,
    /// [50, 70)
    Low,
    /// [70, 85)
    Average,
    /// [85, 100]
    Good,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 4] = [
        ScoreBand::Critical,
        ScoreBand::Low,
        ScoreBand::Average,
        ScoreBand::Good,
    ];

    pub fn from_score(score: f64) -> Self {
        let score = clamp_score(score);
        if score >= 85.0 {
            ScoreBand::Good
        } else if score >= 70.0 {
            ScoreBand::Average
        } else if score >= 50.0 {
            ScoreBand::Low
        } else {
            ScoreBand::Critical
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Critical => "#ef4444",
            ScoreBand::Low => "#f97316",
            ScoreBand::Average => "#eab308",
            ScoreBand::Good => "#10b981",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Critical => "Needs Work",
            ScoreBand::Low => "Low",
            ScoreBand::Average => "Average",
            ScoreBand::Good => "Good",
        }
    }

    /// Legend text, e.g. "Average (70-84)"
    pub fn legend(self) -> String {
        let range = match self {
            ScoreBand::Critical => "0-49",
            ScoreBand::Low => "50-69",
            ScoreBand::Average => "70-84",
            ScoreBand::Good => "85-100",
        };
        format!("{} ({})", self.label(), range)
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamp to [0, 100]; NaN and infinities count as 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Integer value shown for a score.
pub fn display_score(score: f64) -> u32 {
    clamp_score(score).floor() as u32
}
