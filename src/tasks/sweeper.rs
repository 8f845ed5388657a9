//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from an
//! [`ExpiringCache`](crate::cache::ExpiringCache).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::{SweepOutcome, SweptTable};

/// Lifecycle of a sweeper task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Waiting for the next tick or sweeping
    Running,
    /// Exited after shutdown; never restarts
    Stopped,
}

/// Spawns the sweeper for `table`.
///
/// The first pass runs one `interval` after spawning. Each pass takes the
/// table's write lock for a single scan. The task exits when `shutdown_rx`
/// observes `true`, when its sender is dropped, or when a pass finds the
/// table closed.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn spawn_sweeper<V>(
    table: Arc<SweptTable<V>>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!("Starting TTL sweeper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match table.sweep().await {
                        SweepOutcome::Swept(0) => {
                            debug!("TTL sweep: no expired entries found");
                        }
                        SweepOutcome::Swept(removed) => {
                            info!("TTL sweep: removed {} expired entries", removed);
                        }
                        SweepOutcome::Failed => {
                            warn!("TTL sweep pass panicked; will retry next interval");
                        }
                        SweepOutcome::Closed => break,
                    }
                }
            }
        }

        debug!("TTL sweeper stopped");
    })
}
