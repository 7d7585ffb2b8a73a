//! In-memory TTL caches for upstream responses.
//!
//! Entries expire a fixed interval after insertion and are treated as
//! absent afterwards; reads never refresh the clock. Each response kind
//! gets its own `TtlCache` instance, so keys cannot collide across
//! namespaces. Values are written only after a complete successful
//! upstream response.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry<V>>>,
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.inserted_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.into(),
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }
}

/// Cached match-id history for one puuid.
///
/// `requested` records the total the entry was fetched for and
/// `exhausted` whether upstream ran out before reaching it. A later
/// request for more ids than the entry covers must refetch instead of
/// being served a truncated set.
#[derive(Debug, Clone)]
pub struct MatchIdHistory {
    pub ids: Vec<String>,
    pub requested: usize,
    pub exhausted: bool,
}

impl MatchIdHistory {
    pub fn covers(&self, count: usize) -> bool {
        self.requested >= count || self.exhausted
    }
}
