use std::collections::BTreeMap;

use crate::roster::Roster;

/// Roster totals by section, computed fresh on every call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    /// Member count per section label (sections with no members are absent)
    pub sections: BTreeMap<String, usize>,
    /// Students that have not been assigned a section yet
    pub unassigned: usize,
}

/// Count students per section. Read-only.
pub fn summarize(roster: &Roster) -> Summary {
    let mut summary = Summary {
        total: roster.len(),
        ..Summary::default()
    };
    for student in roster {
        match student.section.as_deref() {
            Some(label) => *summary.sections.entry(label.to_string()).or_insert(0) += 1,
            None => summary.unassigned += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Student;

    #[test]
    fn test_counts_per_section() {
        let roster = Roster::new(vec![
            Student::new("a", 7.0, 1).with_section("A"),
            Student::new("b", 7.0, 1).with_section("B"),
            Student::new("c", 7.0, 1).with_section("A"),
            Student::new("d", 7.0, 1),
        ]);
        let summary = summarize(&roster);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.sections.get("A"), Some(&2));
        assert_eq!(summary.sections.get("B"), Some(&1));
        assert_eq!(summary.unassigned, 1);
    }

    #[test]
    fn test_empty_roster() {
        let summary = summarize(&Roster::default());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_reflects_latest_state() {
        let mut roster = Roster::new(vec![Student::new("a", 7.0, 1).with_section("A")]);
        assert_eq!(summarize(&roster).sections.get("A"), Some(&1));
        roster.students[0].section = Some("B".to_string());
        let summary = summarize(&roster);
        assert!(summary.sections.get("A").is_none());
        assert_eq!(summary.sections.get("B"), Some(&1));
    }
}
