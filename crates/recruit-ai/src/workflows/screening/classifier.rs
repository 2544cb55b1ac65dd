use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative bucket derived from an analysis score. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Inclusive lower bounds, evaluated highest first.
const THRESHOLDS: [(i32, ScoreCategory); 4] = [
    (85, ScoreCategory::Excellent),
    (70, ScoreCategory::Good),
    (55, ScoreCategory::Fair),
    (0, ScoreCategory::Poor),
];

impl ScoreCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Good => "Good",
            ScoreCategory::Fair => "Fair",
            ScoreCategory::Poor => "Needs Improvement",
        }
    }

    pub fn min_score(self) -> i32 {
        THRESHOLDS
            .iter()
            .find(|(_, category)| *category == self)
            .map(|(min, _)| *min)
            .unwrap_or(0)
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Bucket a score. No range validation: anything above 100 is still Excellent and anything
/// below zero is Poor.
pub fn classify(score: i32) -> ScoreCategory {
    THRESHOLDS
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, category)| *category)
        .unwrap_or(ScoreCategory::Poor)
}

pub fn decide_selection(score: i32, cutoff: i32) -> bool {
    score >= cutoff
}

/// How strict a cutoff is, as shown next to the cutoff control.
pub fn describe_cutoff(cutoff: i32) -> &'static str {
    match cutoff {
        c if c >= 85 => "Very High (Only exceptional candidates)",
        c if c >= 75 => "High (Above average candidates)",
        c if c >= 65 => "Medium (Average candidates)",
        c if c >= 50 => "Low (Below average candidates)",
        _ => "Very Low (Most candidates will pass)",
    }
}

/// Category and selection decision for one score under one cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreVerdict {
    pub score: u8,
    pub cutoff: u8,
    pub category: ScoreCategory,
    pub selected: bool,
}

impl ScoreVerdict {
    pub fn new(score: u8, cutoff: u8) -> Self {
        let (score_i, cutoff_i) = (i32::from(score), i32::from(cutoff));
        Self {
            score,
            cutoff,
            category: classify(score_i),
            selected: decide_selection(score_i, cutoff_i),
        }
    }
}
