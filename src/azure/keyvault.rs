//! Key vault inventory

use super::auth::TokenCredential;
use super::client::ArmClient;
use crate::throttle::Throttle;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

const KEYVAULT_API_VERSION: &str = "2022-07-01";

pub struct KeyVaultFacade {
    credential: Arc<dyn TokenCredential>,
    throttle: Throttle,
    endpoint: String,
}

impl KeyVaultFacade {
    pub fn new(credential: Arc<dyn TokenCredential>, throttle: Throttle) -> Self {
        Self::with_endpoint(credential, throttle, super::DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(
        credential: Arc<dyn TokenCredential>,
        throttle: Throttle,
        endpoint: &str,
    ) -> Self {
        Self {
            credential,
            throttle,
            endpoint: endpoint.to_string(),
        }
    }

    fn client(&self, subscription_id: &str) -> Result<ArmClient> {
        ArmClient::new(self.credential.clone(), subscription_id, &self.endpoint)
    }

    /// All key vaults in the subscription.
    pub async fn key_vaults(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("key vaults", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url("Microsoft.KeyVault", "vaults", KEYVAULT_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }
}
