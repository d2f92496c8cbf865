pub mod export;
pub mod ingest;
pub mod selection;
pub mod types;

pub use export::{export_roster, to_csv_string, write_csv};
pub use ingest::{parse_roster, read_roster};
pub use selection::Selection;
pub use types::{Roster, Student};
