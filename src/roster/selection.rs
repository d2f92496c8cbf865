use super::types::Student;

/// Which students an operation applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Students whose id is listed
    Ids(Vec<String>),
    /// Students currently in one of the listed sections
    Sections(Vec<String>),
}

impl Selection {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Selection::All => true,
            Selection::Ids(ids) => !student.id.is_empty() && ids.iter().any(|id| *id == student.id),
            Selection::Sections(labels) => student
                .section
                .as_deref()
                .is_some_and(|section| labels.iter().any(|l| l == section)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_selection() {
        let selection = Selection::Ids(vec!["u1".to_string()]);
        assert!(selection.matches(&Student::new("a", 7.0, 1).with_id("u1")));
        assert!(!selection.matches(&Student::new("b", 7.0, 1).with_id("u2")));
        assert!(!selection.matches(&Student::new("c", 7.0, 1)));
    }

    #[test]
    fn test_sections_selection() {
        let selection = Selection::Sections(vec!["A".to_string(), "C".to_string()]);
        assert!(selection.matches(&Student::new("a", 7.0, 1).with_section("C")));
        assert!(!selection.matches(&Student::new("b", 7.0, 1).with_section("B")));
        assert!(!selection.matches(&Student::new("c", 7.0, 1)));
    }

    #[test]
    fn test_all_selection() {
        assert!(Selection::All.matches(&Student::new("a", 7.0, 1)));
    }
}
