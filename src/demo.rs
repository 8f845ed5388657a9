//! Demo walkthrough
//!
//! Exercises both cache variants through the shared contract and prints
//! what happens at each step.

use std::time::Duration;

use anyhow::{ensure, Result};
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::debug;

use crate::cache::{Cache, Closer, ExpiringCache, UnboundedCache};

/// TTL used by the CLI demo
pub const DEMO_TTL: Duration = Duration::from_secs(2);

/// Runs the demo with the given TTL for the expiring cache.
///
/// Waits are derived from `ttl`: expiration waits one and a half TTLs, the
/// TTL reset step waits half a TTL twice.
pub async fn run_demo(ttl: Duration) -> Result<()> {
    println!("=== Cache Implementation Demo ===");
    println!("Tip: run with `serve` to start the HTTP API server");
    println!();

    unbounded_walkthrough().await?;
    println!();
    expiring_walkthrough(ttl).await?;

    println!();
    println!("=== Demo Complete ===");
    Ok(())
}

async fn unbounded_walkthrough() -> Result<()> {
    println!("1. Unbounded in-memory cache:");
    let cache = UnboundedCache::<Value>::new();

    cache.set("user_123", json!("John Doe")).await?;
    cache.set("age_123", json!(30)).await?;

    if let Some(name) = cache.get("user_123").await? {
        println!("   User name: {}", name);
    }
    if let Some(age) = cache.get("age_123").await? {
        println!("   User age: {}", age);
    }

    cache.delete("age_123").await?;
    ensure!(
        cache.get("age_123").await?.is_none(),
        "deleted key is still visible"
    );
    println!("   Age deleted successfully");
    Ok(())
}

async fn expiring_walkthrough(ttl: Duration) -> Result<()> {
    println!("2. Expiring cache (TTL {:?}):", ttl);
    let cache = ExpiringCache::<Value>::new(ttl)?;

    cache.set("temp_data", json!("This will expire")).await?;
    println!("   Set temp_data");

    if let Some(value) = cache.get("temp_data").await? {
        println!("   Immediately after set: {}", value);
    }

    let wait = ttl + ttl / 2;
    println!("   Waiting {:?} for expiration...", wait);
    sleep(wait).await;

    ensure!(
        cache.get("temp_data").await?.is_none(),
        "entry outlived its TTL"
    );
    println!("   After expiration: data no longer exists");

    println!();
    println!("3. TTL reset on update:");
    cache.set("reset_demo", json!("Original value")).await?;
    println!("   Set reset_demo");

    sleep(ttl / 2).await;
    println!("   After {:?}, updating value...", ttl / 2);
    cache.set("reset_demo", json!("Updated value")).await?;

    sleep(ttl / 2).await;
    let value = cache.get("reset_demo").await?;
    ensure!(value.is_some(), "updated entry expired on its first TTL");
    if let Some(value) = value {
        println!("   After another {:?}: {} (TTL was reset)", ttl / 2, value);
    }

    cache.close().await?;
    debug!("Demo cache closed");
    Ok(())
}
