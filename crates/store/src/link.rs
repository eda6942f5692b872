//! Tokenized service-selection link issuing.

use crate::EventType;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// What the link-issuing endpoint needs to mint a personalized link.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRequest {
    /// Email the token is bound to (a synthesized address for SMS-only leads).
    pub email: String,
    /// Id of the contact the link is personalized for.
    pub contact_id: String,
    /// The event the packages are filtered to.
    pub event_type: EventType,
    /// Event date, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
}

/// Issues tokenized service-selection links.
///
/// The endpoint lives outside this core; failures degrade to structured
/// tool errors, never exceptions.
#[async_trait]
pub trait LinkIssuer: Send + Sync {
    /// Mint a link for the given request.
    async fn issue(&self, request: &LinkRequest) -> Result<String>;
}

/// HTTP-backed issuer calling the production link endpoint.
#[derive(Clone)]
pub struct HttpLinkIssuer {
    endpoint: String,
    client: Client,
}

impl HttpLinkIssuer {
    /// Create an issuer for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }
}

/// Link endpoint response body.
#[derive(Debug, Deserialize)]
struct LinkResponse {
    link: String,
}

#[async_trait]
impl LinkIssuer for HttpLinkIssuer {
    async fn issue(&self, request: &LinkRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .context("link endpoint request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("link endpoint returned {status}: {body}");
        }

        let parsed: LinkResponse = response
            .json()
            .await
            .context("link endpoint returned invalid JSON")?;
        Ok(parsed.link)
    }
}

/// Deterministic issuer for tests and local runs.
///
/// Mints `{base}/select/{contact_id}`; can be toggled to fail.
#[derive(Default)]
pub struct StaticLinkIssuer {
    base: String,
    failing: Mutex<bool>,
}

impl StaticLinkIssuer {
    /// Create an issuer minting links under `base`.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            failing: Mutex::new(false),
        }
    }

    /// Make subsequent `issue` calls fail.
    pub fn fail(&self) {
        *self.failing.lock() = true;
    }
}

#[async_trait]
impl LinkIssuer for StaticLinkIssuer {
    async fn issue(&self, request: &LinkRequest) -> Result<String> {
        if *self.failing.lock() {
            anyhow::bail!("link endpoint unavailable");
        }
        Ok(format!(
            "{}/select/{}",
            self.base.trim_end_matches('/'),
            request.contact_id
        ))
    }
}
