use serde::Serialize;

use crate::roster::Student;

pub const DEFAULT_SUBJECT: &str = "Section Update Notification";

pub const DEFAULT_TEMPLATE: &str = "Dear [Recipient Name],

Your section details have been updated as part of the latest student regrouping.

Here are your updated and analyzed details:

CGPA: {cgpa}
LeetCode Questions Solved: {leetcode_questions}
LeetCode ID: {leetcode_id}
Final Score: {final_score}
Previous Section: {previous_section}
New Section: {current_section}

If you have any questions or concerns, please reach out to your coordinator.

Warm regards,
Student Grouping Team
";

/// A rendered message ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Substitute a student's details into `template`.
///
/// Recognized placeholders: `[Recipient Name]`, `{cgpa}`,
/// `{leetcode_questions}`, `{leetcode_id}`, `{final_score}`,
/// `{previous_section}`, `{current_section}`. Missing values render as "N/A".
pub fn render_message(template: &str, student: &Student) -> String {
    let or_na = |value: Option<&str>| value.filter(|v| !v.is_empty()).unwrap_or("N/A").to_string();

    template
        .replace("[Recipient Name]", &student.name)
        .replace("{cgpa}", &student.cgpa.to_string())
        .replace("{leetcode_questions}", &student.practice_count.to_string())
        .replace("{leetcode_id}", &or_na(Some(student.id.as_str())))
        .replace("{final_score}", &student.final_score.to_string())
        .replace("{previous_section}", &or_na(student.previous_section.as_deref()))
        .replace("{current_section}", &or_na(student.section.as_deref()))
}

/// Render one message per student with a non-empty email
pub fn compose<'a, I>(students: I, template: &str, subject: &str) -> Vec<OutgoingMessage>
where
    I: IntoIterator<Item = &'a Student>,
{
    students
        .into_iter()
        .filter(|s| !s.email.is_empty())
        .map(|s| OutgoingMessage {
            to: s.email.clone(),
            subject: subject.to_string(),
            body: render_message(template, s),
        })
        .collect()
}
