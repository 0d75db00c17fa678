//! Logging and monitoring inventory: log profiles, diagnostic settings,
//! activity log alerts

use super::auth::TokenCredential;
use super::client::ArmClient;
use crate::throttle::Throttle;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

const LOG_PROFILES_API_VERSION: &str = "2016-03-01";
// Subscription- and resource-level diagnostic settings still live on the
// preview api-version; the stable one covers resources only.
const DIAGNOSTIC_SETTINGS_API_VERSION: &str = "2017-05-01-preview";
const ACTIVITY_LOG_ALERTS_API_VERSION: &str = "2020-10-01";

pub struct MonitoringFacade {
    credential: Arc<dyn TokenCredential>,
    throttle: Throttle,
    endpoint: String,
}

impl MonitoringFacade {
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

    /// Legacy log profiles for the subscription.
    pub async fn log_profiles(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("log profiles", async {
                let client = self.client(subscription_id)?;
                let url =
                    client.provider_url("Microsoft.Insights", "logprofiles", LOG_PROFILES_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }

    /// Diagnostic settings configured at the subscription scope.
    ///
    /// A 404 means the subscription has never had any; that is an empty
    /// result, not a failure.
    pub async fn subscription_diagnostic_settings(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("subscription diagnostic settings", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url(
                    "Microsoft.Insights",
                    "diagnosticSettings",
                    DIAGNOSTIC_SETTINGS_API_VERSION,
                );
                client.list_optional(&url).await
            })
            .await
    }

    /// Diagnostic settings attached to one resource, by full resource id.
    pub async fn diagnostic_settings(&self, subscription_id: &str, resource_id: &str) -> Vec<Value> {
        self.throttle
            .collect("resource diagnostic settings", async {
                let client = self.client(subscription_id)?;
                let path = format!("{}/providers/Microsoft.Insights/diagnosticSettings", resource_id);
                let url = client.path_url(&path, DIAGNOSTIC_SETTINGS_API_VERSION);
                client.list_optional(&url).await
            })
            .await
    }

    /// Activity log alert rules for the subscription.
    pub async fn activity_log_alerts(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("activity log alerts", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url(
                    "Microsoft.Insights",
                    "activityLogAlerts",
                    ACTIVITY_LOG_ALERTS_API_VERSION,
                );
                client.list_all(&url).await
            })
            .await
    }
}
