// src/display/skills.rs

/// Share of matched vs missing skills, each rounded half-up on its own.
///
/// The two values may sum to 99 or 101; they are never reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkillGap {
    pub matched_pct: u32,
    pub missing_pct: u32,
}

impl SkillGap {
    pub fn from_counts(matched: usize, missing: usize) -> Self {
        let total = matched + missing;
        if total == 0 {
            return Self::default();
        }
        Self {
            matched_pct: percentage(matched, total),
            missing_pct: percentage(missing, total),
        }
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    (100.0 * count as f64 / total as f64).round() as u32
}
