//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check both cache variants against a plain `HashMap`
//! model and to pin down key validation.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{Cache, Closer, ExpiringCache, ExpiringConfig, UnboundedCache};
use crate::error::CacheError;

// == Strategies ==
/// Generates valid cache keys (non-empty)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}".prop_map(|s| s)
}

/// A single contract call
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

/// Applies `ops` to `cache` and to a `HashMap` model, failing on the first
/// observable divergence.
async fn check_against_model(
    cache: &dyn Cache<u32>,
    ops: Vec<CacheOp>,
) -> std::result::Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();

    for op in ops {
        match op {
            CacheOp::Set { key, value } => {
                prop_assert!(cache.set(&key, value).await.is_ok());
                model.insert(key, value);
            }
            CacheOp::Get { key } => {
                let got = cache.get(&key).await;
                prop_assert_eq!(got, Ok(model.get(&key).copied()), "key {}", key);
            }
            CacheOp::Delete { key } => {
                prop_assert!(cache.delete(&key).await.is_ok());
                model.remove(&key);
            }
        }
    }

    for (key, value) in &model {
        prop_assert_eq!(cache.get(key).await, Ok(Some(*value)));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of set/get/delete on the unbounded cache behaves like a map:
    // last writer wins, deletes are idempotent, absent keys read as None.
    #[test]
    fn prop_unbounded_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let cache = UnboundedCache::<u32>::new();
        tokio_test::block_on(check_against_model(&cache, ops))?;
    }

    // With a TTL far beyond the test duration, the expiring cache is
    // indistinguishable from the unbounded one.
    #[test]
    fn prop_expiring_matches_model_before_ttl(
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = ExpiringCache::<u32>::with_config(
                ExpiringConfig::new(Duration::from_secs(300))
                    .with_sweep_interval(Duration::from_millis(1)),
            )
            .unwrap();
            let result = check_against_model(&cache, ops).await;
            cache.close().await.unwrap();
            result
        })?;
    }

    // The sweep interval is always positive and only derived when not given.
    #[test]
    fn prop_resolved_sweep_interval(ttl_ms in 1u64..100_000, interval_ms in 0u64..10_000) {
        let ttl = Duration::from_millis(ttl_ms);
        let config = ExpiringConfig::new(ttl).with_sweep_interval(Duration::from_millis(interval_ms));
        let resolved = config.resolved_sweep_interval();

        prop_assert!(!resolved.is_zero());
        if interval_ms == 0 {
            prop_assert_eq!(resolved, (ttl / 2).max(Duration::from_millis(100)));
        } else {
            prop_assert_eq!(resolved, Duration::from_millis(interval_ms));
        }
    }

    // After close, every operation on every key reports CacheClosed, except
    // an empty key which is rejected first.
    #[test]
    fn prop_closed_cache_rejects_everything(ops in prop::collection::vec(cache_op_strategy(), 1..20)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = ExpiringCache::<u32>::new(Duration::from_secs(300)).unwrap();
            cache.close().await.unwrap();

            for op in ops {
                let result = match op {
                    CacheOp::Set { key, value } => cache.set(&key, value).await,
                    CacheOp::Get { key } => cache.get(&key).await.map(|_| ()),
                    CacheOp::Delete { key } => cache.delete(&key).await,
                };
                prop_assert_eq!(result, Err(CacheError::CacheClosed));
            }
            Ok(())
        })?;
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key_rejected_by_both_variants() {
        let unbounded = UnboundedCache::<u32>::new();
        let expiring = ExpiringCache::<u32>::new(Duration::from_secs(1)).unwrap();
        let caches: [&dyn Cache<u32>; 2] = [&unbounded, &expiring];

        for cache in caches {
            assert_eq!(cache.set("", 1).await, Err(CacheError::InvalidKey));
            assert_eq!(cache.get("").await, Err(CacheError::InvalidKey));
            assert_eq!(cache.delete("").await, Err(CacheError::InvalidKey));
        }

        expiring.close().await.unwrap();
    }
}
