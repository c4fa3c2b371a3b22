//! # Dedup History
//!
//! Process-wide record of item ids that have already been fanned out, shared
//! by every subscription. Unbounded by default; with a capacity the oldest ids
//! are forgotten first.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Seen {
    ids: HashSet<String>,
    order: VecDeque<String>,
}

#[derive(Default)]
pub struct DedupHistory {
    seen: Mutex<Seen>,
    capacity: Option<usize>,
}

impl DedupHistory {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            seen: Mutex::default(),
            capacity: Some(capacity.max(1)),
        }
    }

    /// `0` means unbounded, matching the config convention.
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::unbounded()
        } else {
            Self::bounded(capacity)
        }
    }

    fn lock(&self) -> MutexGuard<'_, Seen> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().ids.contains(id)
    }

    /// Records `id`. Returns `false` if it was already present.
    pub fn insert(&self, id: &str) -> bool {
        let mut seen = self.lock();
        if !seen.ids.insert(id.to_string()) {
            return false;
        }
        seen.order.push_back(id.to_string());

        if let Some(capacity) = self.capacity {
            while seen.order.len() > capacity {
                if let Some(oldest) = seen.order.pop_front() {
                    seen.ids.remove(&oldest);
                }
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.lock().ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_insert_is_idempotent() {
        let history = DedupHistory::unbounded();
        assert!(!history.contains("a1"));
        assert!(history.insert("a1"));
        assert!(!history.insert("a1"));
        assert!(history.contains("a1"));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let history = DedupHistory::with_capacity(2);
        history.insert("a");
        history.insert("b");
        history.insert("c");

        assert!(!history.contains("a"));
        assert!(history.contains("b"));
        assert!(history.contains("c"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_zero_capacity_is_unbounded() {
        let history = DedupHistory::with_capacity(0);
        for i in 0..1000 {
            history.insert(&i.to_string());
        }
        assert_eq!(history.len(), 1000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_claim_once() {
        let history = Arc::new(DedupHistory::unbounded());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let history = history.clone();
            handles.push(tokio::spawn(async move { history.insert("same") }));
        }

        let claimed = futures::future::join_all(handles)
            .await
            .into_iter()
            .filter(|claim| *claim.as_ref().unwrap())
            .count();
        assert_eq!(claimed, 1);
    }
}
