//! In-memory store for cleaning sessions: a cleaned table held under an
//! opaque key so a collaborator (the web layer) can preview and re-download
//! it later.
//!
//! Unlike its predecessor this store is bounded: inserting past capacity
//! evicts the oldest session, and `sweep_expired` drops sessions older than
//! the TTL. Unbounded per-process growth was a known gap.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::constants::Marketplace;
use crate::table::Table;

/// One stored cleaning result.
#[derive(Debug, Clone)]
pub struct CleaningSession {
    pub table: Table,
    pub marketplace: Marketplace,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, CleaningSession>,
    // Insertion order for oldest-first eviction
    order: Vec<String>,
}

/// Bounded session store; safe to share behind an `Arc`.
pub struct SessionStore {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Stores a cleaned table under `key`, evicting the oldest session when
    /// capacity is exceeded.
    pub fn insert(&self, key: String, marketplace: Marketplace, table: Table) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.sessions.contains_key(&key) {
            inner.order.push(key.clone());
        }
        inner.sessions.insert(
            key,
            CleaningSession {
                table,
                marketplace,
                created_at: Utc::now(),
            },
        );
        while inner.order.len() > self.capacity {
            let oldest = inner.order.remove(0);
            inner.sessions.remove(&oldest);
        }
    }

    pub fn get(&self, key: &str) -> Option<CleaningSession> {
        let inner = self.inner.lock().unwrap();
        inner.sessions.get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<CleaningSession> {
        let mut inner = self.inner.lock().unwrap();
        inner.order.retain(|k| k != key);
        inner.sessions.remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops sessions older than the TTL; returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut inner = self.inner.lock().unwrap();
        let expired: Vec<String> = inner
            .sessions
            .iter()
            .filter(|(_, s)| s.created_at < cutoff)
            .map(|(k, _)| k.clone())
            .collect();
        for key in &expired {
            inner.sessions.remove(key);
            inner.order.retain(|k| k != key);
        }
        expired.len()
    }
}
