//! HTTP utilities for Azure Resource Manager calls

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body carried in errors and logs
const MAX_BODY_SNIPPET: usize = 300;

/// Truncate and strip a response body before it goes into a log line or an
/// error message. Non-printable characters are dropped.
fn body_snippet(body: &str) -> String {
    let cleaned: String = body
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .collect();

    if cleaned.len() > MAX_BODY_SNIPPET {
        format!(
            "{}... [truncated, {} bytes total]",
            &cleaned[..MAX_BODY_SNIPPET],
            body.len()
        )
    } else {
        cleaned
    }
}

/// HTTP client wrapper for ARM API calls
#[derive(Clone)]
pub struct ArmHttpClient {
    client: Client,
}

impl ArmHttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// GET an ARM URL, treating 404 as "nothing there".
    ///
    /// Several settings-style listings respond 404 when a subscription has
    /// never had the feature configured; callers that know this pass
    /// through here and map `None` to an empty list.
    pub async fn get_optional(&self, url: &str, token: &str) -> Result<Option<Value>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let snippet = body_snippet(&body);
            tracing::debug!("ARM error: {} - {}", status, snippet);
            // The body snippet rides along in the error so callers can
            // recognize vendor-specific conditions by their message.
            return Err(anyhow::anyhow!("ARM request failed: {}: {}", status, snippet));
        }

        if body.is_empty() {
            return Ok(Some(Value::Null));
        }

        serde_json::from_str(&body)
            .map(Some)
            .context("Failed to parse response JSON")
    }

    /// GET an ARM URL; any non-success status, 404 included, is an error.
    pub async fn get(&self, url: &str, token: &str) -> Result<Value> {
        match self.get_optional(url, token).await? {
            Some(value) => Ok(value),
            None => Err(anyhow::anyhow!("ARM request failed: 404 Not Found: {}", url)),
        }
    }
}
