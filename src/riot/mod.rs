//! Riot API integration
//!
//! - `client`: rate-limited, cached upstream client
//! - `region`: platform code to routing host table
//! - `cache`: in-memory TTL caches
//! - `limiter`: process-wide request scheduler
//! - `error`: upstream failure taxonomy

pub mod cache;
pub mod client;
pub mod error;
pub mod limiter;
pub mod region;

pub use client::{Account, PlayerHandle, RiotClient};
pub use error::RiotError;
pub use region::Region;
