//! Property-based tests for the dispatch contract
//!
//! These tests verify the facade-wide invariants with randomized inputs:
//! successful results pass through the throttle untouched, and failures
//! always collapse to the empty shape.

use cloudskim::throttle::Throttle;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Generate arbitrary resource records as the vendor would return them
fn arb_record() -> impl Strategy<Value = Value> {
    (
        "[a-z][a-z0-9-]{0,62}",      // name
        "[a-z]{2,12}",               // location
        prop_oneof!["Succeeded", "Creating", "Failed", "Deleting"],
    )
        .prop_map(|(name, location, state)| {
            json!({
                "name": name,
                "location": location,
                "properties": {"provisioningState": state}
            })
        })
}

/// Generate a list of records
fn arb_record_list() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_record(), 0..50)
}

proptest! {
    /// Whatever the vendor call yields on success is exactly what the
    /// caller receives, throttled or not.
    #[test]
    fn successful_results_pass_through_unchanged(records in arb_record_list()) {
        let throttled = Throttle::new(10_000);
        let bare = Throttle::unthrottled();

        let via_throttled: Vec<Value> = tokio_test::block_on(
            throttled.collect("records", async { Ok(records.clone()) }),
        );
        let via_bare: Vec<Value> = tokio_test::block_on(
            bare.collect("records", async { Ok(records.clone()) }),
        );

        prop_assert_eq!(&via_throttled, &records);
        prop_assert_eq!(&via_bare, &records);
    }

    /// Any failure message collapses to the empty shape, never a panic or
    /// an error surfacing to the caller.
    #[test]
    fn failures_collapse_to_the_empty_shape(message in "[a-zA-Z0-9 .:_-]{0,80}") {
        let throttle = Throttle::unthrottled();

        let list: Vec<Value> = tokio_test::block_on(
            throttle.collect("records", async { Err(anyhow::anyhow!(message.clone())) }),
        );
        prop_assert!(list.is_empty());
    }

    /// The dispatch tag depends only on whether a limiter is installed.
    #[test]
    fn dispatch_tag_reflects_limiter_presence(value in any::<u32>()) {
        let throttled = Throttle::new(10_000);
        let bare = Throttle::unthrottled();

        let a = tokio_test::block_on(throttled.run(async move { value }));
        let b = tokio_test::block_on(bare.run(async move { value }));

        prop_assert!(a.was_throttled());
        prop_assert!(!b.was_throttled());
        prop_assert_eq!(a.into_inner(), b.into_inner());
    }
}
