//! Cache Module
//!
//! Provides the shared cache contract and its two implementations: an
//! unbounded store and a TTL store with a background sweeper.

mod entry;
mod expiring;
mod unbounded;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, Result};

// Re-export public types
pub use entry::Entry;
pub use expiring::{ExpiringCache, ExpiringConfig};
pub(crate) use expiring::{SweepOutcome, SweptTable};
pub use unbounded::UnboundedCache;

// == Public Constants ==
/// Lower bound for the sweep interval when it is derived from the TTL
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(100);

// == Capability Contracts ==
/// Operations every cache variant supports, so callers can use them
/// interchangeably.
///
/// `get` reports an absent key as `Ok(None)`; errors are reserved for invalid
/// input and lifecycle violations.
#[async_trait]
pub trait Cache<V: Send + Sync + 'static>: Send + Sync {
    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: V) -> Result<()>;

    /// Returns a copy of the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<V>>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Shutdown capability for caches that own background work.
#[async_trait]
pub trait Closer: Send + Sync {
    /// Stops background work and rejects further operations. Idempotent.
    async fn close(&self) -> Result<()>;
}

/// Rejects the empty key.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey);
    }
    Ok(())
}
