//! Compute inventory: virtual machines, extensions, disks, snapshots, images

use super::auth::TokenCredential;
use super::client::ArmClient;
use crate::throttle::Throttle;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

const VM_API_VERSION: &str = "2023-07-01";
const DISK_API_VERSION: &str = "2023-04-02";

pub struct VirtualMachineFacade {
    credential: Arc<dyn TokenCredential>,
    throttle: Throttle,
    endpoint: String,
}

impl VirtualMachineFacade {
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

    /// All virtual machines in the subscription.
    pub async fn instances(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("virtual machines", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url("Microsoft.Compute", "virtualMachines", VM_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }

    /// Extensions installed on one virtual machine.
    pub async fn instance_extensions(
        &self,
        subscription_id: &str,
        resource_group: &str,
        instance_name: &str,
    ) -> Vec<Value> {
        self.throttle
            .collect("virtual machine extensions", async {
                let client = self.client(subscription_id)?;
                let path = format!(
                    "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Compute/virtualMachines/{}/extensions",
                    subscription_id, resource_group, instance_name
                );
                let url = client.path_url(&path, VM_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }

    /// All managed disks in the subscription.
    pub async fn disks(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("disks", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url("Microsoft.Compute", "disks", DISK_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }

    /// All disk snapshots in the subscription.
    pub async fn snapshots(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("snapshots", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url("Microsoft.Compute", "snapshots", DISK_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }

    /// All managed images in the subscription.
    pub async fn images(&self, subscription_id: &str) -> Vec<Value> {
        self.throttle
            .collect("images", async {
                let client = self.client(subscription_id)?;
                let url = client.provider_url("Microsoft.Compute", "images", VM_API_VERSION);
                client.list_all(&url).await
            })
            .await
    }
}
