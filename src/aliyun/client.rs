//! Alibaba Cloud client factories
//!
//! Factories mirror the facade error contract: a client that cannot be
//! built is logged and returned as `None`, and the caller's collection run
//! moves on without that product family.

use super::endpoints::EndpointRegistry;
use anyhow::{Context, Result};
use std::time::Duration;

/// Vendor calls hang on unhealthy endpoints without these; the values are
/// deliberate and load-bearing, not defaults to tune per call.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(20);

/// Resolved Alibaba Cloud credentials, injected by the caller.
#[derive(Clone)]
pub struct AliyunCredentials {
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Caller account id, when the credential source resolved one.
    pub account_id: Option<String>,
}

impl AliyunCredentials {
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            account_id: None,
        }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Report label for this account: `aliyun-{account_id}`, or bare
    /// `aliyun` when the id is unknown.
    pub fn report_name(&self) -> String {
        match &self.account_id {
            Some(account_id) => format!("aliyun-{}", account_id),
            None => "aliyun".to_string(),
        }
    }
}

/// Configured client for Alibaba Cloud RPC-style products.
pub struct AcsClient {
    http: reqwest::Client,
    credentials: AliyunCredentials,
    endpoints: EndpointRegistry,
}

impl AcsClient {
    fn build(credentials: &AliyunCredentials, region: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            credentials: credentials.clone(),
            endpoints: EndpointRegistry::for_region(region),
        })
    }

    pub fn region(&self) -> &str {
        self.endpoints.region()
    }

    pub fn access_key_id(&self) -> &str {
        &self.credentials.access_key_id
    }

    /// Hostname this client will use for `product`.
    pub fn endpoint_for(&self, product: &str) -> String {
        self.endpoints.resolve(product)
    }

    /// Transport handle for the service layer driving this client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Client for the object-storage service.
pub struct OssClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: AliyunCredentials,
}

impl OssClient {
    fn build(credentials: &AliyunCredentials, region: Option<&str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        let endpoint = match region {
            Some(region) => format!("oss-{}.aliyuncs.com", region),
            None => format!("oss-{}.aliyuncs.com", super::DEFAULT_REGION),
        };

        Ok(Self {
            http,
            endpoint,
            credentials: credentials.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn access_key_id(&self) -> &str {
        &self.credentials.access_key_id
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Build an [`AcsClient`] for `region` (default when `None`).
///
/// Construction failure is logged and yields `None`; one bad account must
/// not abort an inventory sweep covering many.
pub fn acs_client(credentials: &AliyunCredentials, region: Option<&str>) -> Option<AcsClient> {
    let region = region.unwrap_or(super::DEFAULT_REGION);
    match AcsClient::build(credentials, region) {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::error!("Failed to build Alibaba Cloud client: {:#}", err);
            None
        }
    }
}

/// Build an [`OssClient`], same contract as [`acs_client`].
pub fn oss_client(credentials: &AliyunCredentials, region: Option<&str>) -> Option<OssClient> {
    match OssClient::build(credentials, region) {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::error!("Failed to build object storage client: {:#}", err);
            None
        }
    }
}
