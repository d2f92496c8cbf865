use std::collections::HashMap;

use super::types::VerificationResult;
use crate::roster::{Roster, Student};

/// Merge verification results into the roster, in place.
///
/// Only counts are staged: scores and sections are left as they are until
/// the caller reevaluates. A student's pre-verification count is kept in
/// `original_practice_count` the first time it is overwritten and never
/// replaced after that. Students without a matching result, or with an
/// empty id, are not touched. When the same id appears twice in `results`
/// the later row wins.
///
/// Returns the number of students whose count changed.
pub fn reconcile(roster: &mut Roster, results: &[VerificationResult]) -> usize {
    reconcile_matching(roster, results, |_| true)
}

/// `reconcile`, restricted to students accepted by `include`
pub fn reconcile_matching<F>(roster: &mut Roster, results: &[VerificationResult], include: F) -> usize
where
    F: Fn(&Student) -> bool,
{
    let by_id: HashMap<&str, &VerificationResult> =
        results.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut corrected = 0;
    for student in roster.iter_mut().filter(|s| !s.id.is_empty() && include(s)) {
        let Some(result) = by_id.get(student.id.as_str()) else {
            continue;
        };
        student.verified = Some(result.verified);

        let Some(actual) = result.actual_practice_count else {
            continue;
        };
        if actual != student.practice_count {
            log::debug!(
                "{} ({}): practice count {} -> {}",
                student.name,
                student.id,
                student.practice_count,
                actual
            );
            if student.original_practice_count.is_none() {
                student.original_practice_count = Some(student.practice_count);
            }
            student.practice_count = actual;
            corrected += 1;
        }
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Student;

    fn single(count: u64) -> Roster {
        Roster::new(vec![Student::new("Asha", 8.0, count).with_id("u1")])
    }

    #[test]
    fn test_differing_count_overwritten() {
        let mut roster = single(5);
        let corrected = reconcile(&mut roster, &[VerificationResult::new("u1", 8, true)]);
        assert_eq!(corrected, 1);
        assert_eq!(roster.students[0].practice_count, 8);
        assert_eq!(roster.students[0].original_practice_count, Some(5));
        assert_eq!(roster.students[0].verified, Some(true));
    }

    #[test]
    fn test_matching_count_unchanged() {
        let mut roster = single(5);
        let corrected = reconcile(&mut roster, &[VerificationResult::new("u1", 5, true)]);
        assert_eq!(corrected, 0);
        assert_eq!(roster.students[0].practice_count, 5);
        assert!(roster.students[0].original_practice_count.is_none());
    }

    #[test]
    fn test_original_count_set_once() {
        let mut roster = single(5);
        reconcile(&mut roster, &[VerificationResult::new("u1", 8, true)]);
        reconcile(&mut roster, &[VerificationResult::new("u1", 11, true)]);
        assert_eq!(roster.students[0].practice_count, 11);
        assert_eq!(roster.students[0].original_practice_count, Some(5));
    }

    #[test]
    fn test_scores_not_recomputed() {
        let mut roster = single(5);
        roster.students[0].normalized_practice = 10.0;
        roster.students[0].final_score = 52.0;
        roster.students[0].section = Some("A".to_string());

        reconcile(&mut roster, &[VerificationResult::new("u1", 1, true)]);

        assert_eq!(roster.students[0].normalized_practice, 10.0);
        assert_eq!(roster.students[0].final_score, 52.0);
        assert_eq!(roster.students[0].section.as_deref(), Some("A"));
    }

    #[test]
    fn test_unmatched_students_untouched() {
        let mut roster = Roster::new(vec![
            Student::new("Asha", 8.0, 5).with_id("u1"),
            Student::new("Ravi", 7.0, 9).with_id("u2"),
            Student::new("Noid", 7.0, 3),
        ]);
        let before = roster.clone();
        reconcile(
            &mut roster,
            &[VerificationResult::new("u1", 6, true), VerificationResult::new("", 0, false)],
        );
        assert_eq!(roster.students[1], before.students[1]);
        assert_eq!(roster.students[2], before.students[2]);
    }

    #[test]
    fn test_missing_actual_count_only_records_flag() {
        let mut roster = single(5);
        let result = VerificationResult {
            id: "u1".to_string(),
            actual_practice_count: None,
            verified: false,
        };
        assert_eq!(reconcile(&mut roster, &[result]), 0);
        assert_eq!(roster.students[0].practice_count, 5);
        assert_eq!(roster.students[0].verified, Some(false));
    }

    #[test]
    fn test_duplicate_ids_last_row_wins() {
        let mut roster = single(5);
        reconcile(
            &mut roster,
            &[VerificationResult::new("u1", 7, true), VerificationResult::new("u1", 9, true)],
        );
        assert_eq!(roster.students[0].practice_count, 9);
    }

    #[test]
    fn test_reconcile_matching_skips_excluded() {
        let mut roster = Roster::new(vec![
            Student::new("Asha", 8.0, 5).with_id("u1").with_section("A"),
            Student::new("Twin", 8.0, 5).with_id("u1").with_section("B"),
        ]);
        let corrected = reconcile_matching(
            &mut roster,
            &[VerificationResult::new("u1", 9, true)],
            |s| s.section.as_deref() == Some("A"),
        );
        assert_eq!(corrected, 1);
        assert_eq!(roster.students[0].practice_count, 9);
        assert_eq!(roster.students[1].practice_count, 5);
        assert!(roster.students[1].verified.is_none());
    }
}
