//! The six rule engines behind the ProgexAI endpoints.
//!
//! Every engine is a stateless pure function: it maps a request to a response
//! using the constant tables in [`crate::knowledge`] plus weighted-sum scoring.
//! Nothing here retains state between calls, and all scores are clamped to
//! `[0, 1]` before they leave an engine.

pub mod breakdown;
pub mod code;
pub mod ideas;
pub mod learning;
pub mod progress;
pub mod roles;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures an engine can surface to the HTTP boundary.
///
/// Missing or empty input arrays are not errors (they default to empty);
/// this type covers inputs an engine cannot compute over at all.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("timeline end date must be after the start date")]
    InvalidTimeline,
}

/// Experience level of a user, or difficulty tier of a template/topic.
/// The two share a scale and are compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Clamp a composite score into the documented `[0, 1]` range.
pub(crate) fn clamp01(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Case-insensitive bidirectional containment check. "react" matches
/// "React Native" and vice versa; this is the fuzziness every keyword
/// table in the engines relies on.
pub(crate) fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Fraction of `targets` that fuzzy-match at least one entry of `held`.
/// Empty `targets` yields 0.0 rather than dividing by zero.
pub(crate) fn overlap_ratio(targets: &[&str], held: &[String]) -> f64 {
    if targets.is_empty() {
        return 0.0;
    }
    let matched = targets
        .iter()
        .filter(|t| held.iter().any(|h| fuzzy_match(t, h)))
        .count();
    matched as f64 / targets.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_match_is_bidirectional_and_case_insensitive() {
        assert!(fuzzy_match("React", "react native"));
        assert!(fuzzy_match("react native", "React"));
        assert!(!fuzzy_match("Python", "Rust"));
    }

    #[test]
    fn overlap_ratio_handles_empty_inputs() {
        assert_eq!(overlap_ratio(&[], &["React".into()]), 0.0);
        assert_eq!(overlap_ratio(&["React"], &[]), 0.0);
        assert_eq!(overlap_ratio(&["React", "Vue.js"], &["react".into()]), 0.5);
    }

    #[test]
    fn clamp01_bounds_scores() {
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(0.4), 0.4);
    }
}
