/// One row of the roster.
///
/// `normalized_practice` and `final_score` are derived and only meaningful
/// after a scoring pass; ingest leaves them at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub cgpa: f64,
    pub practice_count: u64,
    /// Count held before the first verification correction
    pub original_practice_count: Option<u64>,
    pub normalized_practice: f64,
    pub final_score: f64,
    pub section: Option<String>,
    pub previous_section: Option<String>,
    /// External identity used to match verification results
    pub id: String,
    pub email: String,
    /// Verified flag from the most recent verification round, if any
    pub verified: Option<bool>,
}

impl Student {
    pub fn new(name: impl Into<String>, cgpa: f64, practice_count: u64) -> Self {
        Self {
            name: name.into(),
            cgpa,
            practice_count,
            original_practice_count: None,
            normalized_practice: 0.0,
            final_score: 0.0,
            section: None,
            previous_section: None,
            id: String::new(),
            email: String::new(),
            verified: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Move to `label`, remembering the old section only when it changes.
    /// Returns true if the section changed.
    pub fn move_to(&mut self, label: &str) -> bool {
        if self.section.as_deref() == Some(label) {
            return false;
        }
        // First assignment keeps previous_section absent rather than "N/A"
        if let Some(old) = self.section.take() {
            self.previous_section = Some(old);
        }
        self.section = Some(label.to_string());
        true
    }

    /// Previous section for display ("N/A" when never reallocated)
    pub fn previous_section_display(&self) -> &str {
        self.previous_section.as_deref().unwrap_or("N/A")
    }
}

/// Ordered sequence of students processed together.
///
/// The caller owns the roster; core operations borrow it and hand back a
/// transformed copy, so a failed operation cannot leave it half-mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    pub students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Student> {
        self.students.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Student> {
        self.students.iter_mut()
    }

    /// Number of distinct non-empty section labels currently in use
    pub fn distinct_sections(&self) -> usize {
        let mut labels: Vec<&str> = self
            .students
            .iter()
            .filter_map(|s| s.section.as_deref())
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

impl From<Vec<Student>> for Roster {
    fn from(students: Vec<Student>) -> Self {
        Self::new(students)
    }
}

impl IntoIterator for Roster {
    type Item = Student;
    type IntoIter = std::vec::IntoIter<Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.into_iter()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Student;
    type IntoIter = std::slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.students.iter()
    }
}
