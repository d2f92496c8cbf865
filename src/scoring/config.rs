use serde::{Deserialize, Serialize};

pub const DEFAULT_CGPA_WEIGHT: f64 = 4.0;
pub const DEFAULT_PRACTICE_WEIGHT: f64 = 2.0;

/// Upper bound of the normalized practice scale
pub const NORMALIZED_SCALE: f64 = 10.0;

/// Decimal places kept on normalized and final scores
pub const SCORE_PRECISION: i32 = 3;

/// Scoring weights.
///
/// `FinalScore = cgpa_weight * CGPA + practice_weight * NormalizedPractice`.
/// Omitted weights fall back to the defaults (4 and 2).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   cgpa_weight: 4
///   practice_weight: 2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Multiplier applied to CGPA (default: 4.0)
    #[serde(default)]
    pub cgpa_weight: Option<f64>,

    /// Multiplier applied to the 0-10 normalized practice score (default: 2.0)
    #[serde(default)]
    pub practice_weight: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cgpa_weight: Some(DEFAULT_CGPA_WEIGHT),
            practice_weight: Some(DEFAULT_PRACTICE_WEIGHT),
        }
    }
}

impl ScoringConfig {
    pub fn cgpa_weight(&self) -> f64 {
        self.cgpa_weight.unwrap_or(DEFAULT_CGPA_WEIGHT)
    }

    pub fn practice_weight(&self) -> f64 {
        self.practice_weight.unwrap_or(DEFAULT_PRACTICE_WEIGHT)
    }
}
