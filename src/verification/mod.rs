pub mod client;
pub mod reconcile;
pub mod types;

pub use client::{HttpVerifier, VerificationService};
pub use reconcile::{reconcile, reconcile_matching};
pub use types::{VerificationRequest, VerificationResult};
