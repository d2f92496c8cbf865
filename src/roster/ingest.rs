use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::{Roster, Student};

const NAME: &[&str] = &["name"];
const CGPA: &[&str] = &["cgpa"];
const COUNT: &[&str] = &[
    "practicecount",
    "practice_count",
    "leetcode_questions",
    "no_of_leetcode_question",
];
const EMAIL: &[&str] = &["email"];
const ID: &[&str] = &["id", "leetcode_id"];
const SECTION: &[&str] = &["section", "current_section"];
const PREVIOUS: &[&str] = &["previoussection", "previous_section"];
const ORIGINAL: &[&str] = &[
    "originalpracticecount",
    "original_practice_count",
    "original_leetcode_questions",
];
const VERIFIED: &[&str] = &["verified"];

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    cgpa: usize,
    count: usize,
    email: usize,
    id: Option<usize>,
    section: Option<usize>,
    previous: Option<usize>,
    original: Option<usize>,
    verified: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.iter().any(|alias| h.as_str() == *alias))
        };

        let mut missing = Vec::new();
        let mut required = |aliases: &[&str], label: &'static str| {
            let idx = find(aliases);
            if idx.is_none() {
                missing.push(label);
            }
            idx.unwrap_or(0)
        };
        let name = required(NAME, "Name");
        let cgpa = required(CGPA, "CGPA");
        let count = required(COUNT, "PracticeCount");
        let email = required(EMAIL, "Email");

        if !missing.is_empty() {
            bail!(
                "CSV must contain columns Name, CGPA, PracticeCount, Email; missing: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            name,
            cgpa,
            count,
            email,
            id: find(ID),
            section: find(SECTION),
            previous: find(PREVIOUS),
            original: find(ORIGINAL),
            verified: find(VERIFIED),
        })
    }
}

/// Strip, underscore inner spaces, lowercase ("LeetCode Questions" -> "leetcode_questions")
fn normalize_header(header: &str) -> String {
    header.trim().replace(' ', "_").to_lowercase()
}

/// Read a roster CSV from disk
pub fn read_roster(path: &Path) -> Result<Roster> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open roster file at {}", path.display()))?;
    parse_roster(file).with_context(|| format!("Failed to ingest roster from {}", path.display()))
}

/// Parse a roster from any CSV source, preserving row order
pub fn parse_roster<R: Read>(reader: R) -> Result<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header row")?.clone();
    let columns = Columns::resolve(&headers)?;

    let mut students = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record.with_context(|| format!("CSV parse error at row {}", row))?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        students.push(parse_student(&record, &columns, row)?);
    }

    log::debug!("Ingested {} students", students.len());
    Ok(Roster::new(students))
}

fn parse_student(record: &csv::StringRecord, columns: &Columns, row: usize) -> Result<Student> {
    let field = |idx: usize| record.get(idx).unwrap_or("");
    let optional = |idx: Option<usize>| idx.map(|i| field(i)).filter(|v| !v.is_empty());

    let cgpa: f64 = field(columns.cgpa)
        .parse()
        .with_context(|| format!("Row {}: invalid CGPA '{}'", row, field(columns.cgpa)))?;
    if !cgpa.is_finite() {
        bail!("Row {}: CGPA must be a finite number", row);
    }

    let practice_count = parse_count(field(columns.count))
        .with_context(|| format!("Row {}: invalid practice count '{}'", row, field(columns.count)))?;

    let original_practice_count = optional(columns.original)
        .map(|v| {
            parse_count(v)
                .with_context(|| format!("Row {}: invalid original practice count '{}'", row, v))
        })
        .transpose()?;

    let verified = optional(columns.verified)
        .map(|v| {
            parse_flag(v).with_context(|| format!("Row {}: invalid Verified value '{}'", row, v))
        })
        .transpose()?;

    let mut student = Student::new(field(columns.name), cgpa, practice_count)
        .with_email(field(columns.email))
        .with_id(optional(columns.id).unwrap_or(""));
    student.original_practice_count = original_practice_count;
    student.verified = verified;
    student.section = optional(columns.section).map(str::to_string);
    student.previous_section = optional(columns.previous)
        .filter(|v| !v.eq_ignore_ascii_case("n/a"))
        .map(str::to_string);

    Ok(student)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("expected true or false"),
    }
}

/// Counts must be non-negative integers; "12.0" is accepted since
/// spreadsheet exports often write integers as floats.
fn parse_count(value: &str) -> Result<u64> {
    if let Ok(count) = value.parse::<u64>() {
        return Ok(count);
    }
    let as_float: f64 = value.parse().context("not a number")?;
    if as_float < 0.0 || as_float.fract() != 0.0 || !as_float.is_finite() {
        bail!("must be a non-negative integer");
    }
    Ok(as_float as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_original_column_names() {
        let csv = "Name, CGPA ,LeetCode Questions,Email,Section,LeetCode ID\n\
                   Asha,8.5,120,asha@example.com,B,asha_lc\n\
                   Ravi,7.25,40,ravi@example.com,A,ravi_lc\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();

        assert_eq!(roster.len(), 2);
        let asha = &roster.students[0];
        assert_eq!(asha.name, "Asha");
        assert_eq!(asha.cgpa, 8.5);
        assert_eq!(asha.practice_count, 120);
        assert_eq!(asha.email, "asha@example.com");
        assert_eq!(asha.section.as_deref(), Some("B"));
        assert_eq!(asha.id, "asha_lc");
        assert!(asha.previous_section.is_none());
    }

    #[test]
    fn test_missing_section_column_leaves_unassigned() {
        let csv = "Name,CGPA,PracticeCount,Email\nAsha,8.5,10,a@x.com\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert!(roster.students[0].section.is_none());
        assert_eq!(roster.students[0].id, "");
    }

    #[test]
    fn test_missing_required_columns_listed() {
        let csv = "Name,Section\nAsha,A\n";
        let err = parse_roster(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("CGPA"));
        assert!(err.contains("PracticeCount"));
        assert!(err.contains("Email"));
        assert!(!err.contains("missing: Name"));
    }

    #[test]
    fn test_previous_section_na_reads_as_absent() {
        let csv = "Name,CGPA,PracticeCount,Email,Previous_Section,Section\n\
                   Asha,8.5,10,a@x.com,N/A,A\n\
                   Ravi,7.0,5,r@x.com,C,B\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert!(roster.students[0].previous_section.is_none());
        assert_eq!(roster.students[1].previous_section.as_deref(), Some("C"));
    }

    #[test]
    fn test_float_formatted_count_accepted() {
        let csv = "Name,CGPA,PracticeCount,Email\nAsha,8.5,42.0,a@x.com\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(roster.students[0].practice_count, 42);
    }

    #[test]
    fn test_negative_count_rejected_with_row() {
        let csv = "Name,CGPA,PracticeCount,Email\nAsha,8.5,10,a@x.com\nRavi,7.0,-4,r@x.com\n";
        let err = parse_roster(csv.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("Row 2"));
    }

    #[test]
    fn test_bad_cgpa_rejected() {
        let csv = "Name,CGPA,PracticeCount,Email\nAsha,high,10,a@x.com\n";
        let err = parse_roster(csv.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid CGPA"));
    }

    #[test]
    fn test_verified_column() {
        let csv = "Name,CGPA,PracticeCount,Email,Verified\n\
                   Asha,8.5,10,a@x.com,true\n\
                   Ravi,7.0,5,r@x.com,FALSE\n\
                   Mei,7.0,5,m@x.com,\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(roster.students[0].verified, Some(true));
        assert_eq!(roster.students[1].verified, Some(false));
        assert_eq!(roster.students[2].verified, None);

        let bad = "Name,CGPA,PracticeCount,Email,Verified\nAsha,8.5,10,a@x.com,maybe\n";
        let err = parse_roster(bad.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid Verified value"));
    }

    #[test]
    fn test_blank_rows_skipped() {
        let csv = "Name,CGPA,PracticeCount,Email\nAsha,8.5,10,a@x.com\n,,,\n";
        let roster = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_read_roster_missing_file() {
        let err = read_roster(Path::new("/nonexistent/roster.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open roster file"));
    }
}
