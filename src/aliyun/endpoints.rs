//! Alibaba Cloud endpoint registration
//!
//! The vendor SDK's built-in resolver fails for several products in
//! non-mainland regions, so known products are registered explicitly:
//! regional products follow the `{product}.{region}.aliyuncs.com` pattern,
//! identity and security-token products use fixed global hostnames.
//! Anything not registered falls back to the regional pattern, which is
//! what the vendor resolver would have produced anyway.

use std::collections::HashMap;

/// Products whose endpoint is derived from the region.
const REGIONAL_PRODUCTS: &[&str] = &["Ecs", "Vpc", "Rds", "Kms", "Actiontrail", "Ocs"];

/// Products pinned to a global hostname regardless of region.
const GLOBAL_PRODUCTS: &[(&str, &str)] = &[("Sts", "sts.aliyuncs.com"), ("Ram", "ram.aliyuncs.com")];

/// Hostname for `product` in `region` following the regional pattern.
pub fn product_endpoint(product: &str, region: &str) -> String {
    format!("{}.{}.aliyuncs.com", product.to_ascii_lowercase(), region)
}

/// Explicit product → hostname table for one region.
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    region: String,
    hosts: HashMap<String, String>,
}

impl EndpointRegistry {
    /// Register the known products for `region`.
    pub fn for_region(region: &str) -> Self {
        let mut registry = Self {
            region: region.to_string(),
            hosts: HashMap::new(),
        };

        for product in REGIONAL_PRODUCTS {
            registry.register(product, &product_endpoint(product, region));
        }
        for (product, host) in GLOBAL_PRODUCTS {
            registry.register(product, host);
        }

        registry
    }

    /// Register (or overwrite) one product's hostname.
    pub fn register(&mut self, product: &str, host: &str) {
        self.hosts.insert(product.to_string(), host.to_string());
    }

    /// Resolve a product's hostname, falling back to the regional pattern
    /// for products that were never registered.
    pub fn resolve(&self, product: &str) -> String {
        self.hosts
            .get(product)
            .cloned()
            .unwrap_or_else(|| product_endpoint(product, &self.region))
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn regional_products_follow_the_region() {
        let registry = EndpointRegistry::for_region("eu-central-1");
        assert_eq!(registry.resolve("Ecs"), "ecs.eu-central-1.aliyuncs.com");
        assert_eq!(registry.resolve("Rds"), "rds.eu-central-1.aliyuncs.com");
        assert_eq!(registry.resolve("Actiontrail"), "actiontrail.eu-central-1.aliyuncs.com");
    }

    #[test]
    fn identity_products_stay_global() {
        let registry = EndpointRegistry::for_region("eu-central-1");
        assert_eq!(registry.resolve("Sts"), "sts.aliyuncs.com");
        assert_eq!(registry.resolve("Ram"), "ram.aliyuncs.com");
    }

    #[test]
    fn unregistered_products_fall_back_to_the_regional_pattern() {
        let registry = EndpointRegistry::for_region("cn-hangzhou");
        assert_eq!(registry.resolve("Slb"), "slb.cn-hangzhou.aliyuncs.com");
    }

    #[test]
    fn explicit_registration_wins() {
        let mut registry = EndpointRegistry::for_region("cn-hangzhou");
        registry.register("Ecs", "ecs-internal.example.com");
        assert_eq!(registry.resolve("Ecs"), "ecs-internal.example.com");
    }

    proptest! {
        #[test]
        fn derivation_never_panics_and_embeds_the_region(
            region in "[a-z]{2}-[a-z]{3,12}(-[0-9])?",
            product in "[A-Z][a-z]{1,12}",
        ) {
            let host = product_endpoint(&product, &region);
            prop_assert!(host.starts_with(&product.to_ascii_lowercase()));
            prop_assert!(host.contains(&region));
            prop_assert!(host.ends_with(".aliyuncs.com"));
        }
    }
}
