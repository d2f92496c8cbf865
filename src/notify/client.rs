use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::future::Future;

use super::template::OutgoingMessage;

/// External email delivery service. Sends the whole batch or fails.
pub trait DispatchService {
    fn send(&self, messages: &[OutgoingMessage]) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Serialize)]
struct DispatchBody<'a> {
    messages: &'a [OutgoingMessage],
}

/// Mail relay reached over HTTP with a JSON body
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDispatcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl DispatchService for HttpDispatcher {
    async fn send(&self, messages: &[OutgoingMessage]) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", "regroup")
            .json(&DispatchBody { messages })
            .send()
            .await
            .with_context(|| format!("Failed to reach dispatch service at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Dispatch service returned HTTP {}", status);
        }
        Ok(())
    }
}
