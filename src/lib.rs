//! Cloud inventory facades for Azure and Alibaba Cloud
//!
//! Each facade wraps one family of management-plane listing calls behind a
//! total interface: every public method returns a fully drained, plain
//! sequence (or mapping) of vendor records, and converts any failure into
//! an empty result after logging it. Callers collecting an inventory never
//! have to handle per-resource faults; partial failure is isolated to the
//! single call that hit it.
//!
//! All calls pass through one shared [`throttle::Throttle`], which gates how
//! many vendor requests may start per second across the whole process.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cloudskim::azure::{auth::StaticToken, compute::VirtualMachineFacade};
//! use cloudskim::throttle::Throttle;
//!
//! async fn example() {
//!     let credential = Arc::new(StaticToken::new("token"));
//!     let facade = VirtualMachineFacade::new(credential, Throttle::shared().clone());
//!     // Never fails; an unreachable API yields an empty list.
//!     let instances = facade.instances("00000000-0000-0000-0000-000000000000").await;
//!     println!("{} instances", instances.len());
//! }
//! ```

pub mod aliyun;
pub mod azure;
pub mod config;
pub mod throttle;

/// Identifying string sent with every vendor request.
pub const USER_AGENT: &str = concat!("cloudskim/", env!("CARGO_PKG_VERSION"));

pub use config::CollectorConfig;
pub use throttle::{Dispatch, Throttle};
