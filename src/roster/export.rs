use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::types::Roster;

/// Export header. The first eight columns are the display projection;
/// `Id`, `OriginalPracticeCount` and `Verified` ride along so the file can
/// be re-ingested for the next step of a session.
pub const EXPORT_HEADER: [&str; 11] = [
    "Name",
    "CGPA",
    "PracticeCount",
    "NormalizedPractice",
    "FinalScore",
    "PreviousSection",
    "Section",
    "Email",
    "Id",
    "OriginalPracticeCount",
    "Verified",
];

/// Serialize the roster as CSV into any writer
pub fn write_csv<W: Write>(roster: &Roster, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(EXPORT_HEADER)
        .context("Failed to write CSV header")?;

    for student in roster {
        let record = [
            student.name.clone(),
            student.cgpa.to_string(),
            student.practice_count.to_string(),
            student.normalized_practice.to_string(),
            student.final_score.to_string(),
            student.previous_section_display().to_string(),
            student.section.clone().unwrap_or_default(),
            student.email.clone(),
            student.id.clone(),
            student
                .original_practice_count
                .map(|c| c.to_string())
                .unwrap_or_default(),
            student.verified.map(|v| v.to_string()).unwrap_or_default(),
        ];
        writer
            .write_record(&record)
            .with_context(|| format!("Failed to write row for {}", student.name))?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Render the roster as a CSV string
pub fn to_csv_string(roster: &Roster) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(roster, &mut buf)?;
    String::from_utf8(buf).context("CSV output was not valid UTF-8")
}

/// Write the roster CSV to `path` atomically
///
/// The target is never left half-written: either the old file stays or the
/// complete new one replaces it.
pub fn export_roster(path: &Path, roster: &Roster) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    write_csv(roster, &mut file)?;

    file.commit()
        .with_context(|| format!("Failed to save roster to {}", path.display()))?;

    Ok(())
}
