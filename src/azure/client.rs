//! Subscription-scoped ARM client
//!
//! Builds the URLs for one subscription's management-plane listings and
//! drains their pagination. Nothing lazy crosses this boundary: callers
//! get plain, fully collected vectors.

use super::auth::{TokenCredential, ARM_SCOPE};
use super::http::ArmHttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Client bound to one subscription.
#[derive(Clone)]
pub struct ArmClient {
    http: ArmHttpClient,
    credential: Arc<dyn TokenCredential>,
    subscription_id: String,
    endpoint: String,
}

impl ArmClient {
    /// Build a client for `subscription_id` against `endpoint`.
    ///
    /// The endpoint must be an absolute URL; a trailing slash is accepted
    /// and normalized away.
    pub fn new(
        credential: Arc<dyn TokenCredential>,
        subscription_id: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let parsed = Url::parse(endpoint)
            .with_context(|| format!("Invalid management endpoint: {}", endpoint))?;

        Ok(Self {
            http: ArmHttpClient::new()?,
            credential,
            subscription_id: subscription_id.to_string(),
            endpoint: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Subscription scope string, used by scope-parameterized listings.
    pub fn scope(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }

    /// URL for a provider collection under this subscription,
    /// e.g. `providers/Microsoft.Compute/virtualMachines`.
    pub fn provider_url(&self, namespace: &str, resource: &str, api_version: &str) -> String {
        format!(
            "{}/subscriptions/{}/providers/{}/{}?api-version={}",
            self.endpoint, self.subscription_id, namespace, resource, api_version
        )
    }

    /// URL for an absolute ARM path (starting with `/`), e.g. a full
    /// resource id plus a sub-collection suffix.
    pub fn path_url(&self, path: &str, api_version: &str) -> String {
        format!("{}{}?api-version={}", self.endpoint, path, api_version)
    }

    async fn get(&self, url: &str) -> Result<Value> {
        let token = self.credential.token(ARM_SCOPE).await?;
        self.http.get(url, &token).await
    }

    async fn get_optional(&self, url: &str) -> Result<Option<Value>> {
        let token = self.credential.token(ARM_SCOPE).await?;
        self.http.get_optional(url, &token).await
    }

    /// Drain a paginated listing into a plain vector.
    ///
    /// Follows `nextLink` until absent, unwrapping each page's `value`
    /// payload.
    pub async fn list_all(&self, url: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut next = url.to_string();

        loop {
            let page = self.get(&next).await?;
            items.extend(extract_items(&page));

            match page.get("nextLink").and_then(Value::as_str) {
                Some(link) if !link.is_empty() => next = link.to_string(),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Drain a paginated listing, keeping whatever was collected when a
    /// page fails.
    ///
    /// Exists for one vendor quirk: the last page of the compliance-results
    /// listing intermittently responds with a missing-parameter error. The
    /// swallowed error is logged at debug.
    pub async fn list_all_tolerant(&self, url: &str) -> Vec<Value> {
        let mut items = Vec::new();
        let mut next = url.to_string();

        loop {
            let page = match self.get(&next).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::debug!(
                        "Stopping drain of {} after {} items: {:#}",
                        url,
                        items.len(),
                        err
                    );
                    break;
                }
            };
            items.extend(extract_items(&page));

            match page.get("nextLink").and_then(Value::as_str) {
                Some(link) if !link.is_empty() => next = link.to_string(),
                _ => break,
            }
        }

        items
    }

    /// Single-page listing where 404 means "none configured".
    pub async fn list_optional(&self, url: &str) -> Result<Vec<Value>> {
        match self.get_optional(url).await? {
            Some(page) => Ok(extract_items(&page)),
            None => Ok(Vec::new()),
        }
    }
}

/// Unwrap a listing payload: a `value` array, or a bare top-level array.
fn extract_items(page: &Value) -> Vec<Value> {
    if let Some(value) = page.get("value").and_then(Value::as_array) {
        return value.clone();
    }
    if let Some(items) = page.as_array() {
        return items.clone();
    }
    Vec::new()
}
