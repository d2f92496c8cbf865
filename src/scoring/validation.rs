use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = [
        ("cgpa_weight", config.cgpa_weight),
        ("practice_weight", config.practice_weight),
    ];
    for (name, weight) in weights {
        if let Some(w) = weight {
            if !w.is_finite() {
                errors.push(format!("scoring.{}: must be a finite number", name));
            } else if w < 0.0 {
                errors.push(format!("scoring.{}: must be non-negative", name));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
