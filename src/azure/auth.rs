//! Azure credentials
//!
//! Credential acquisition is the caller's concern: facades receive an
//! object that can resolve a bearer token for the ARM scope. A caching
//! wrapper is provided so repeated facade calls don't hammer the token
//! source.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Token scope for Azure Resource Manager calls.
pub const ARM_SCOPE: &str = "https://management.azure.com/.default";

/// Token expiry buffer - refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if the source doesn't report expiry (conservative: 30 minutes)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// A source of resolved bearer tokens.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    /// Resolve an access token for `scope`.
    async fn token(&self, scope: &str) -> Result<String>;
}

/// A pre-resolved token, for tests and short-lived tooling.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticToken {
    async fn token(&self, _scope: &str) -> Result<String> {
        Ok(self.token.clone())
    }
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Caching wrapper around a [`TokenCredential`].
///
/// Returns the cached token while it is still comfortably inside its TTL,
/// otherwise asks the inner credential for a fresh one.
#[derive(Clone)]
pub struct CachedCredential {
    inner: Arc<dyn TokenCredential>,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl CachedCredential {
    pub fn new(inner: Arc<dyn TokenCredential>) -> Self {
        Self {
            inner,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Drop the cached token so the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }
}

#[async_trait]
impl TokenCredential for CachedCredential {
    async fn token(&self, scope: &str) -> Result<String> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let token = self.inner.token(scope).await?;
        let expires_at = Instant::now() + DEFAULT_TOKEN_TTL - TOKEN_EXPIRY_BUFFER;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        Ok(token)
    }
}
