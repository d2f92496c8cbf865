pub mod config;
pub mod engine;
pub mod normalize;
pub mod validation;

pub use config::*;
pub use engine::{explain, final_score, round_score, score, FactorContribution, ScoreBreakdown};
pub use normalize::{max_practice, normalize, normalized_value};
pub use validation::validate_scoring;
