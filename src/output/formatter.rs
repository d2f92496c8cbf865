use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::allocation::Allocation;
use crate::roster::{Roster, Student};
use crate::scoring::ScoreBreakdown;
use crate::summary::Summary;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with exactly three decimals ("54.000")
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Section transition column: "C -> A", "A" when unchanged or first assignment
fn format_transition(student: &Student) -> String {
    let current = student.section.as_deref().unwrap_or("-");
    match student.previous_section.as_deref() {
        Some(prev) if prev != current => format!("{} -> {}", prev, current),
        _ => current.to_string(),
    }
}

/// Practice count, with the pre-verification count when it was corrected
fn format_practice(student: &Student) -> String {
    match student.original_practice_count {
        Some(original) if original != student.practice_count => {
            format!("{} (was {})", student.practice_count, original)
        }
        _ => student.practice_count.to_string(),
    }
}

/// Format the roster as a ranked table.
///
/// Columns: index, final score, section (with transition), name, CGPA,
/// practice count (with original count if it was corrected), email.
/// No headers, matching the minimal list style.
pub fn format_roster_table(roster: &Roster, use_colors: bool) -> String {
    if roster.is_empty() {
        return "No students found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = format!("{}", roster.len()).len().max(2) + 1;
    let score_width = 8;
    let section_width = roster
        .iter()
        .map(|s| format_transition(s).len())
        .max()
        .unwrap_or(1);
    let separator = "  ";

    roster
        .iter()
        .enumerate()
        .map(|(idx, student)| {
            let index_str = format!("{:>width$}.", idx + 1, width = index_width - 1);
            let score_str = format!("{:>width$}", format_score(student.final_score), width = score_width);
            let section_str = format!("{:<width$}", format_transition(student), width = section_width);

            let practice = format_practice(student);
            let details = format!("CGPA {}  solved {}  {}", student.cgpa, practice, student.email);

            let fixed_width = index_width + 1 + score_width + section_width + separator.len() * 3 + details.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&student.name, width - fixed_width),
                Some(_) => truncate_name(&student.name, 20),
                None => student.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    section_str.cyan(),
                    separator,
                    name,
                    separator,
                    details.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, section_str, separator, name, separator, details
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format section counts and totals
pub fn format_summary(summary: &Summary, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let total = format!("Total students: {}", summary.total);
    lines.push(if use_colors { total.bold().to_string() } else { total });

    for (label, count) in &summary.sections {
        let label = format!("Section {}", label);
        if use_colors {
            lines.push(format!("  {}: {}", label.cyan(), count));
        } else {
            lines.push(format!("  {}: {}", label, count));
        }
    }
    if summary.unassigned > 0 {
        lines.push(format!("  Unassigned: {}", summary.unassigned));
    }
    lines.join("\n")
}

/// Per-student outcome of a verification round: id, status, count.
///
/// Students the service returned no result for show as "no result".
pub fn format_verification<'a, I>(students: I, use_colors: bool) -> String
where
    I: IntoIterator<Item = &'a Student>,
{
    let students: Vec<&Student> = students.into_iter().collect();
    if students.is_empty() {
        return "No students selected.".to_string();
    }

    let id_width = students.iter().map(|s| s.id.chars().count()).max().unwrap_or(0);
    students
        .iter()
        .map(|student| {
            let id = format!("{:<width$}", student.id, width = id_width);
            let status = match student.verified {
                Some(true) => "verified",
                Some(false) => "unverified",
                None => "no result",
            };
            let status_str = format!("{:<10}", status);
            let practice = format_practice(student);

            let status_str = match (use_colors, student.verified) {
                (false, _) => status_str,
                (true, Some(true)) => status_str.green().to_string(),
                (true, Some(false)) => status_str.red().bold().to_string(),
                (true, None) => status_str.dimmed().to_string(),
            };
            format!("{}  {}  {}", id, status_str, practice)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line describing an allocation run (verbose mode)
pub fn format_allocation(allocation: &Allocation) -> String {
    let sizes = allocation
        .sections
        .iter()
        .map(|(label, size)| format!("{}={}", label, size))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Allocated {} ({} moved)", sizes, allocation.moved)
}

/// Format a single student with a score breakdown (for verbose mode)
pub fn format_student_detail(student: &Student, breakdown: &ScoreBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{} ({})", student.name.bold(), student.id.yellow()));
    } else {
        lines.push(format!("{} ({})", student.name, student.id));
    }
    for factor in &breakdown.factors {
        lines.push(format!(
            "  {}: {} = {}",
            factor.label,
            factor.description,
            format_score(factor.points)
        ));
    }
    lines.push(format!("  Final score: {}", format_score(breakdown.total)));
    lines.push(format!(
        "  Section: {} (previous: {})",
        student.section.as_deref().unwrap_or("-"),
        student.previous_section_display()
    ));
    lines.join("\n")
}
