//! Background Tasks Module
//!
//! Contains background tasks owned by cache instances.
//!
//! # Tasks
//! - TTL Sweeper: removes expired entries at the configured interval

mod sweeper;

pub(crate) use sweeper::spawn_sweeper;
pub use sweeper::SweeperState;
