//! Role-based access control inventory

use super::auth::TokenCredential;
use super::client::ArmClient;
use crate::throttle::Throttle;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

const AUTHORIZATION_API_VERSION: &str = "2022-04-01";

pub struct RbacFacade {
    credential: Arc<dyn TokenCredential>,
    throttle: Throttle,
    endpoint: String,
}

impl RbacFacade {
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

    /// Role definitions visible at the subscription scope.
    pub async fn roles(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("roles", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url(
                    "Microsoft.Authorization",
                    "roleDefinitions",
                    AUTHORIZATION_API_VERSION,
                );
                client.list_all(&url).await
            })
            .await
    }

    /// Role assignments at the subscription scope.
    pub async fn role_assignments(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("role assignments", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url(
                    "Microsoft.Authorization",
                    "roleAssignments",
                    AUTHORIZATION_API_VERSION,
                );
                client.list_all(&url).await
            })
            .await
    }
}
