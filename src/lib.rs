//! Mini Cache - A concurrency-safe in-memory key-value cache
//!
//! Provides an unbounded cache and a TTL cache with lazy expiration on read,
//! an active background sweep, and a one-shot shutdown protocol. A small REST
//! front end and a CLI demo sit on top of the shared cache contract.

pub mod api;
pub mod cache;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, Closer, ExpiringCache, ExpiringConfig, UnboundedCache};
pub use config::{CacheMode, Config};
pub use error::{CacheError, Result};
pub use tasks::SweeperState;
