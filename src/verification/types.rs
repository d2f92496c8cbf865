use serde::{Deserialize, Serialize};

/// One student sent for re-verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "PracticeCount")]
    pub practice_count: u64,
}

/// One row of the verification service response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    #[serde(rename = "Id", alias = "LeetCode_ID")]
    pub id: String,
    /// Count the service observed; `None` when it could not report one
    #[serde(
        rename = "ActualPracticeCount",
        alias = "Actual_Leetcode_Questions",
        default
    )]
    pub actual_practice_count: Option<u64>,
    #[serde(rename = "Verified", default)]
    pub verified: bool,
}

impl VerificationResult {
    pub fn new(id: impl Into<String>, actual_practice_count: u64, verified: bool) -> Self {
        Self {
            id: id.into(),
            actual_practice_count: Some(actual_practice_count),
            verified,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequestBody<'a> {
    pub students: &'a [VerificationRequest],
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponseBody {
    pub results: Vec<VerificationResult>,
}
