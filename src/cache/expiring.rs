//! Expiring Cache Module
//!
//! TTL store combining lazy expiration on read with an active background
//! sweep, plus a one-shot shutdown protocol.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{validate_key, Cache, Closer, Entry, MIN_SWEEP_INTERVAL};
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweeper, SweeperState};

// == Expiring Config ==
/// Construction parameters for [`ExpiringCache`].
///
/// ```rust
/// use mini_cache::cache::ExpiringConfig;
/// use std::time::Duration;
///
/// let config = ExpiringConfig::new(Duration::from_secs(30))
///     .with_sweep_interval(Duration::from_secs(5));
/// assert_eq!(config.resolved_sweep_interval(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringConfig {
    /// Lifetime of every entry, measured from its latest `set`
    pub ttl: Duration,
    /// Interval between sweeps; `None` or zero selects the default
    pub sweep_interval: Option<Duration>,
}

impl ExpiringConfig {
    /// Creates a config with the given TTL and the default sweep interval.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sweep_interval: None,
        }
    }

    /// Sets an explicit sweep interval.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    /// Returns the interval the sweeper will use.
    ///
    /// A missing or zero interval falls back to `max(ttl / 2, 100ms)`.
    pub fn resolved_sweep_interval(&self) -> Duration {
        match self.sweep_interval {
            Some(interval) if !interval.is_zero() => interval,
            _ => (self.ttl / 2).max(MIN_SWEEP_INTERVAL),
        }
    }
}

// == Swept Table ==
/// Table state shared between the cache handle and its sweeper task.
///
/// `closed` is only written while the write lock is held, and operations
/// only consult it while holding the lock, so it shares the table's
/// critical section.
#[derive(Debug)]
pub(crate) struct SweptTable<V> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    closed: AtomicBool,
}

/// Result of one sweeper pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepOutcome {
    /// Pass completed, this many entries removed
    Swept(usize),
    /// Pass panicked; the sweeper keeps running
    Failed,
    /// Cache is closed; the sweeper must stop
    Closed,
}

impl<V> SweptTable<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::CacheClosed);
        }
        Ok(())
    }

    // == Sweep ==
    /// Removes every entry expired at the current instant in a single pass
    /// under the write lock.
    pub(crate) async fn sweep(&self) -> SweepOutcome {
        let mut entries = self.entries.write().await;
        if self.closed.load(Ordering::Acquire) {
            return SweepOutcome::Closed;
        }

        let now = Instant::now();
        let before = entries.len();
        let pass = panic::catch_unwind(AssertUnwindSafe(|| {
            entries.retain(|_, entry| !entry.is_expired_at(now));
        }));

        match pass {
            Ok(()) => SweepOutcome::Swept(before - entries.len()),
            Err(_) => SweepOutcome::Failed,
        }
    }
}

// == Expiring Cache ==
/// Key-value cache where every entry expires `ttl` after its latest `set`.
///
/// Expired entries are hidden from `get` immediately but only removed by the
/// background sweeper. The sweeper starts on construction and stops on
/// [`Closer::close`] or when the cache is dropped.
///
/// Requires a Tokio runtime at construction.
pub struct ExpiringCache<V> {
    table: Arc<SweptTable<V>>,
    ttl: Duration,
    sweep_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<V> ExpiringCache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache with the given TTL and the default sweep interval.
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::with_config(ExpiringConfig::new(ttl))
    }

    /// Creates a cache from a full configuration and starts its sweeper.
    ///
    /// # Errors
    /// - `InvalidTtl` if the TTL is zero
    /// - `Internal` if called outside a Tokio runtime
    pub fn with_config(config: ExpiringConfig) -> Result<Self> {
        if config.ttl.is_zero() {
            return Err(CacheError::InvalidTtl);
        }

        if Handle::try_current().is_err() {
            return Err(CacheError::Internal(
                "ExpiringCache requires a Tokio runtime to run its sweeper".to_string(),
            ));
        }

        let sweep_interval = config.resolved_sweep_interval();
        let table = Arc::new(SweptTable::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_sweeper(Arc::clone(&table), sweep_interval, shutdown_rx);

        info!(
            "Expiring cache created: ttl={:?}, sweep_interval={:?}",
            config.ttl, sweep_interval
        );

        Ok(Self {
            table,
            ttl: config.ttl,
            sweep_interval,
            shutdown_tx,
            sweeper: Mutex::new(Some(handle)),
        })
    }
}

impl<V> ExpiringCache<V> {
    /// Returns the configured TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the effective sweep interval.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    // == Is Closed ==
    /// Non-blocking query of the closed flag.
    pub fn is_closed(&self) -> bool {
        self.table.closed.load(Ordering::Acquire)
    }

    /// Reports whether the background sweeper is still alive.
    pub fn sweeper_state(&self) -> SweeperState {
        // The sweeper owns the only receiver; it is dropped when the task ends
        if self.shutdown_tx.receiver_count() == 0 {
            SweeperState::Stopped
        } else {
            SweeperState::Running
        }
    }

    // == Length ==
    /// Returns the number of physically stored entries, including expired
    /// entries the sweeper has not removed yet.
    pub async fn len(&self) -> usize {
        self.table.entries.read().await.len()
    }

    /// Returns true if no entries are physically stored.
    pub async fn is_empty(&self) -> bool {
        self.table.entries.read().await.is_empty()
    }
}

#[async_trait]
impl<V> Cache<V> for ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn set(&self, key: &str, value: V) -> Result<()> {
        validate_key(key)?;

        let mut entries = self.table.entries.write().await;
        self.table.ensure_open()?;
        entries.insert(key.to_string(), Entry::new(value, self.ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<V>> {
        validate_key(key)?;

        let entries = self.table.entries.read().await;
        self.table.ensure_open()?;

        // Expired entries are left in place for the sweeper
        let value = entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone());
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        let mut entries = self.table.entries.write().await;
        self.table.ensure_open()?;
        entries.remove(key);
        Ok(())
    }
}

#[async_trait]
impl<V> Closer for ExpiringCache<V>
where
    V: Send + Sync + 'static,
{
    async fn close(&self) -> Result<()> {
        {
            let _entries = self.table.entries.write().await;
            if self.table.closed.swap(true, Ordering::AcqRel) {
                debug!("Expiring cache already closed");
                return Ok(());
            }
        }

        // The sweeper may already be gone if the runtime dropped it
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.sweeper.lock().await.take() {
            if let Err(e) = handle.await {
                warn!("Sweeper task ended abnormally: {}", e);
            }
        }

        info!("Expiring cache closed");
        Ok(())
    }
}

impl<V> Drop for ExpiringCache<V> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl<V> std::fmt::Debug for ExpiringCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("ttl", &self.ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
