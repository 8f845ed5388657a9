//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value paired with its absolute expiration instant.
///
/// Entries are replaced wholesale on update; the expiration is never
/// extended in place.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being visible to readers; `None` when
    /// the TTL reaches past what `Instant` can represent
    pub expires_at: Option<Instant>,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    ///
    /// A TTL too large to add to the current instant never expires.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry is expired at the given instant.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so an
    /// entry whose TTL has fully elapsed is never returned.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or zero once expired.
    ///
    /// An entry without an expiration reports `Duration::MAX`.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(expires_at) => expires_at.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}
