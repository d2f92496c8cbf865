use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::notify::{DEFAULT_SUBJECT, DEFAULT_TEMPLATE};
use crate::scoring::ScoringConfig;

pub const DEFAULT_VERIFY_ENDPOINT: &str = "http://localhost:5000/verify";
pub const DEFAULT_DISPATCH_ENDPOINT: &str = "http://localhost:5000/send-emails";
pub const DEFAULT_VERIFY_TIMEOUT: &str = "30s";
pub const DEFAULT_DISPATCH_TIMEOUT: &str = "60s";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default section count for allocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<i64>,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    #[serde(default)]
    pub verification: Option<VerificationConfig>,
    #[serde(default)]
    pub dispatch: Option<DispatchConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VerificationConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    /// humantime duration, e.g. "30s"
    #[serde(default)]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub timeout: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

impl Config {
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn verify_endpoint(&self) -> &str {
        self.verification
            .as_ref()
            .and_then(|v| v.endpoint.as_deref())
            .unwrap_or(DEFAULT_VERIFY_ENDPOINT)
    }

    pub fn verify_timeout(&self) -> Result<Duration> {
        let raw = self
            .verification
            .as_ref()
            .and_then(|v| v.timeout.as_deref())
            .unwrap_or(DEFAULT_VERIFY_TIMEOUT);
        humantime::parse_duration(raw)
            .with_context(|| format!("verification.timeout: invalid duration '{}'", raw))
    }

    pub fn dispatch_endpoint(&self) -> &str {
        self.dispatch
            .as_ref()
            .and_then(|d| d.endpoint.as_deref())
            .unwrap_or(DEFAULT_DISPATCH_ENDPOINT)
    }

    pub fn dispatch_timeout(&self) -> Result<Duration> {
        let raw = self
            .dispatch
            .as_ref()
            .and_then(|d| d.timeout.as_deref())
            .unwrap_or(DEFAULT_DISPATCH_TIMEOUT);
        humantime::parse_duration(raw)
            .with_context(|| format!("dispatch.timeout: invalid duration '{}'", raw))
    }

    pub fn dispatch_subject(&self) -> &str {
        self.dispatch
            .as_ref()
            .and_then(|d| d.subject.as_deref())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    pub fn dispatch_template(&self) -> &str {
        self.dispatch
            .as_ref()
            .and_then(|d| d.template.as_deref())
            .unwrap_or(DEFAULT_TEMPLATE)
    }
}
