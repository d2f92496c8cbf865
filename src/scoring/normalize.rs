use super::config::NORMALIZED_SCALE;
use crate::roster::Roster;

/// Largest raw practice count in the roster (0 for an empty roster)
pub fn max_practice(roster: &Roster) -> u64 {
    roster.iter().map(|s| s.practice_count).max().unwrap_or(0)
}

/// Rescale one count onto [0, 10] relative to `max`.
/// A zero max yields 0 for everyone.
pub fn normalized_value(count: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 / max as f64) * NORMALIZED_SCALE
}

/// Recompute `normalized_practice` for every student, in place.
///
/// Values are left unrounded; `score` uses them at full precision and rounds
/// them afterwards.
pub fn normalize(roster: &mut Roster) {
    let max = max_practice(roster);
    for student in roster.iter_mut() {
        student.normalized_practice = normalized_value(student.practice_count, max);
    }
    log::debug!("Normalized {} students against max practice {}", roster.len(), max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Student;

    #[test]
    fn test_max_student_gets_full_scale() {
        let mut roster = Roster::new(vec![
            Student::new("a", 8.0, 50),
            Student::new("b", 8.0, 200),
            Student::new("c", 8.0, 0),
        ]);
        normalize(&mut roster);
        assert_eq!(roster.students[0].normalized_practice, 2.5);
        assert_eq!(roster.students[1].normalized_practice, 10.0);
        assert_eq!(roster.students[2].normalized_practice, 0.0);
    }

    #[test]
    fn test_all_zero_counts_normalize_to_zero() {
        let mut roster = Roster::new(vec![Student::new("a", 9.0, 0), Student::new("b", 6.0, 0)]);
        normalize(&mut roster);
        assert!(roster.iter().all(|s| s.normalized_practice == 0.0));
    }

    #[test]
    fn test_empty_roster_is_noop() {
        let mut roster = Roster::default();
        normalize(&mut roster);
        assert!(roster.is_empty());
        assert_eq!(max_practice(&roster), 0);
    }

    #[test]
    fn test_stale_normalized_value_overwritten() {
        let mut student = Student::new("a", 8.0, 10);
        student.normalized_practice = 7.7;
        let mut roster = Roster::new(vec![student, Student::new("b", 8.0, 40)]);
        normalize(&mut roster);
        assert_eq!(roster.students[0].normalized_practice, 2.5);
    }
}
