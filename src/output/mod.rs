pub mod formatter;

pub use formatter::{
    format_allocation, format_roster_table, format_score, format_student_detail, format_summary,
    format_verification, should_use_colors,
};
