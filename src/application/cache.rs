//! # TTL Cache
//!
//! Small in-memory value store with a fixed time-to-live per entry.
//!
//! Expiry is enforced twice: lazily when an entry is read, and by a one-shot
//! timer task scheduled at the TTL boundary of every `set`. Whichever happens
//! first removes the entry. Timers only remove entries that are actually
//! expired, so re-setting a key is never undone by an older timer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

type Entries<T> = Arc<Mutex<HashMap<String, Entry<T>>>>;

pub struct Cache<T> {
    entries: Entries<T>,
    ttl: Duration,
}

impl<T> Clone for Cache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

fn lock<T>(entries: &Mutex<HashMap<String, Entry<T>>>) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + Send + 'static> Cache<T> {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores `value` under `key`, expiring `ttl` from now. Last write wins.
    pub fn set(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let expires_at = Instant::now() + self.ttl;
        lock(&self.entries).insert(key.clone(), Entry { value, expires_at });

        // Outside a runtime only the lazy check applies.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let entries = Arc::downgrade(&self.entries);
            handle.spawn(async move {
                tokio::time::sleep_until(expires_at).await;
                if let Some(entries) = entries.upgrade() {
                    let mut guard = lock(&entries);
                    if guard.get(&key).is_some_and(|e| e.expires_at <= Instant::now()) {
                        guard.remove(&key);
                    }
                }
            });
        }
    }

    /// Returns the value if present and not expired; drops expired entries.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut guard = lock(&self.entries);
        match guard.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                guard.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` regardless of expiry. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        lock(&self.entries).remove(key).is_some()
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + Send + 'static> Default for Cache<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
