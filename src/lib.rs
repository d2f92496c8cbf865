pub mod allocation;
pub mod config;
pub mod error;
pub mod notify;
pub mod output;
pub mod pipeline;
pub mod roster;
pub mod scoring;
pub mod summary;
pub mod verification;

pub use error::{Error, Result};
pub use pipeline::{
    allocate_sections, dispatch_selected, normalize_and_score, reconcile_verification, reevaluate,
    reevaluate_allocated, verify_selected,
};
pub use roster::{Roster, Selection, Student};
pub use summary::{summarize, Summary};
