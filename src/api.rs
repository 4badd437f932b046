//! Review API client.
//!
//! The poller only sees the [`HomeworkSource`] trait; [`PracticumClient`]
//! is the real implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{BotError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can answer "what changed since `from_date`?".
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch the raw response body for the window starting at `from_date`.
    /// No retries; the poller's fixed interval is the retry policy.
    async fn fetch_updates(&self, from_date: i64) -> Result<Value>;
}

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch_updates(&self, from_date: i64) -> Result<Value> {
        debug!(from_date, endpoint = %self.endpoint, "Requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Request to review API failed: {}", e);
                BotError::Transport(e)
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Review API is unavailable");
            return Err(BotError::Service { status: status.as_u16() });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            error!("Failed to decode review API response: {}", e);
            BotError::Decode(e)
        })
    }
}
