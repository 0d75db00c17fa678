//! Azure Resource Manager facades
//!
//! One facade per resource domain, each wrapping the management-plane
//! listing calls an inventory collector needs. Facades are total: a failed
//! call is logged and comes back as an empty result.
//!
//! # Module Structure
//!
//! - [`auth`] - injected token credentials with expiry-buffered caching
//! - [`http`] - authenticated HTTP plumbing for ARM calls
//! - [`client`] - subscription-scoped client and pagination draining
//! - [`compute`] - virtual machines, extensions, disks, snapshots, images
//! - [`keyvault`] - key vaults
//! - [`monitoring`] - log profiles, diagnostic settings, activity log alerts
//! - [`rbac`] - role definitions and assignments
//! - [`security`] - Security Center inventory and compliance aggregation
//! - [`mysql`] - Azure Database for MySQL servers

pub mod auth;
pub mod client;
pub mod compute;
pub mod http;
pub mod keyvault;
pub mod monitoring;
pub mod mysql;
pub mod rbac;
pub mod security;

/// Production ARM endpoint. Facades accept an override for sovereign
/// clouds and tests.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
