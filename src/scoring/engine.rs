use super::config::{ScoringConfig, SCORE_PRECISION};
use crate::roster::{Roster, Student};

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,       // e.g. "CGPA", "Practice"
    pub description: String, // e.g. "8.5 x 4"
    pub points: f64,         // Weighted contribution to the final score
}

/// How a student's final score decomposes into weighted parts
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    pub total: f64,
}

/// Round half away from zero to `SCORE_PRECISION` decimal places.
///
/// Operates on the binary value, so inputs like 1.0005 that are stored just
/// below the midpoint round down. Results that round to zero are always
/// positive zero.
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_PRECISION);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Weighted composite of CGPA and the unrounded normalized practice value,
/// rounded once at the end
pub fn final_score(cgpa: f64, normalized_practice: f64, config: &ScoringConfig) -> f64 {
    round_score(config.cgpa_weight() * cgpa + config.practice_weight() * normalized_practice)
}

/// Recompute `final_score` from the full-precision normalized value, then
/// round `normalized_practice`, for every student in place. Must follow
/// `normalize` on the same roster.
pub fn score(roster: &mut Roster, config: &ScoringConfig) {
    for student in roster.iter_mut() {
        student.final_score = final_score(student.cgpa, student.normalized_practice, config);
        student.normalized_practice = round_score(student.normalized_practice);
    }
}

/// Explain a student's current final score (verbose output)
pub fn explain(student: &Student, config: &ScoringConfig) -> ScoreBreakdown {
    let cgpa_weight = config.cgpa_weight();
    let practice_weight = config.practice_weight();

    let factors = vec![
        FactorContribution {
            label: "CGPA".to_string(),
            description: format!("{} x {}", student.cgpa, cgpa_weight),
            points: cgpa_weight * student.cgpa,
        },
        FactorContribution {
            label: "Practice".to_string(),
            description: format!(
                "{} solved -> {} normalized x {}",
                student.practice_count, student.normalized_practice, practice_weight
            ),
            points: practice_weight * student.normalized_practice,
        },
    ];

    ScoreBreakdown {
        factors,
        total: student.final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{normalize, normalized_value};

    fn scored(students: Vec<Student>) -> Roster {
        let mut roster = Roster::new(students);
        normalize(&mut roster);
        score(&mut roster, &ScoringConfig::default());
        roster
    }

    #[test]
    fn test_default_weights() {
        let roster = scored(vec![Student::new("a", 8.5, 100), Student::new("b", 7.0, 50)]);
        // 4 * 8.5 + 2 * 10
        assert_eq!(roster.students[0].final_score, 54.0);
        // 4 * 7.0 + 2 * 5
        assert_eq!(roster.students[1].final_score, 38.0);
    }

    #[test]
    fn test_rounds_to_three_places() {
        let roster = scored(vec![Student::new("a", 8.0, 1), Student::new("b", 8.0, 3)]);
        let a = &roster.students[0];
        assert_eq!(a.normalized_practice, 3.333);
        // 32 + 6.6667, not 32 + 2 * 3.333
        assert_eq!(a.final_score, 38.667);
    }

    #[test]
    fn test_ranking_uses_unrounded_practice() {
        let roster = scored(vec![
            Student::new("b", 5.0, 2),
            Student::new("a", 6.666875, 1),
            Student::new("c", 0.0, 3),
        ]);
        // 33.3333 and 33.33417: distinct once rounded at the end
        assert_eq!(roster.students[0].final_score, 33.333);
        assert_eq!(roster.students[1].final_score, 33.334);
        assert!(roster.students[1].final_score > roster.students[0].final_score);
    }

    #[test]
    fn test_final_score_matches_formula() {
        let roster = scored(vec![
            Student::new("a", 9.13, 17),
            Student::new("b", 6.47, 230),
            Student::new("c", 7.891, 99),
        ]);
        let max = 230;
        for s in &roster {
            let raw = normalized_value(s.practice_count, max);
            assert_eq!(s.final_score, round_score(4.0 * s.cgpa + 2.0 * raw));
            assert_eq!(s.normalized_practice, round_score(raw));
        }
    }

    #[test]
    fn test_custom_weights() {
        let config = ScoringConfig {
            cgpa_weight: Some(1.0),
            practice_weight: Some(0.0),
        };
        assert_eq!(final_score(8.25, 10.0, &config), 8.25);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_score(2.0625), 2.063);
        assert_eq!(round_score(-2.0625), -2.063);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_negative_values_rounding_to_zero_are_positive_zero() {
        let rounded = round_score(-0.0004);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());

        let roster = scored(vec![Student::new("a", -0.0001, 0), Student::new("b", 0.0, 0)]);
        assert!(roster.students[0].final_score.is_sign_positive());
    }

    #[test]
    fn test_explain_parts_sum_to_total() {
        let roster = scored(vec![Student::new("a", 8.5, 100), Student::new("b", 7.0, 50)]);
        let breakdown = explain(&roster.students[1], &ScoringConfig::default());
        assert_eq!(breakdown.factors.len(), 2);
        assert_eq!(breakdown.factors[0].label, "CGPA");
        let sum: f64 = breakdown.factors.iter().map(|f| f.points).sum();
        assert!((sum - breakdown.total).abs() < 0.002);
    }
}
