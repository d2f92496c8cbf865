use anyhow::{bail, Context, Result};
use std::future::Future;

use super::types::{VerificationRequest, VerificationResult, VerifyRequestBody, VerifyResponseBody};

/// External service that independently re-counts solved problems.
///
/// A call either returns a result set or fails as a whole; partial results
/// are never reported.
pub trait VerificationService {
    fn verify(
        &self,
        batch: &[VerificationRequest],
    ) -> impl Future<Output = Result<Vec<VerificationResult>>> + Send;
}

/// Verification service reached over HTTP with a JSON body
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpVerifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl VerificationService for HttpVerifier {
    async fn verify(&self, batch: &[VerificationRequest]) -> Result<Vec<VerificationResult>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", "regroup")
            .json(&VerifyRequestBody { students: batch })
            .send()
            .await
            .with_context(|| format!("Failed to reach verification service at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Verification service returned HTTP {}", status);
        }

        let body: VerifyResponseBody = response
            .json()
            .await
            .context("Failed to parse verification response JSON")?;

        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn batch() -> Vec<VerificationRequest> {
        vec![VerificationRequest {
            id: "u1".to_string(),
            practice_count: 5,
        }]
    }

    #[tokio::test]
    async fn test_verify_posts_selection_and_parses_results() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/verify")
                    .json_body(serde_json::json!({
                        "students": [{"Id": "u1", "PracticeCount": 5}]
                    }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "results": [{"LeetCode_ID": "u1", "Actual_Leetcode_Questions": 8, "Verified": true}]
                    }));
            })
            .await;

        let verifier = HttpVerifier::new(server.url("/verify"));
        let results = verifier.verify(&batch()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results, vec![VerificationResult::new("u1", 8, true)]);
    }

    #[tokio::test]
    async fn test_verify_server_error_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/verify");
                then.status(503);
            })
            .await;

        let verifier = HttpVerifier::new(server.url("/verify"));
        let err = verifier.verify(&batch()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_verify_malformed_body_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/verify");
                then.status(200).body("not json");
            })
            .await;

        let verifier = HttpVerifier::new(server.url("/verify"));
        assert!(verifier.verify(&batch()).await.is_err());
    }
}
