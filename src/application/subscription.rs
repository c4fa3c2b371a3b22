//! # Feed Subscription
//!
//! One perpetual polling loop per feed. Each cycle fetches the feed, takes the
//! newest item and announces it on the dispatch queue when its publication
//! timestamp differs from the last one seen. The very first item after start
//! is always announced.
//!
//! Fetching, the empty-feed back-off and the sleep between cycles are the only
//! suspension points; each of them also watches the shutdown signal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::domain::traits::FeedSource;
use crate::domain::types::{Detection, Item};
use crate::strings::logs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    /// Pause between cycles, and after a failed fetch.
    pub interval: Duration,
    /// Pause before re-polling a feed that returned no items.
    pub retry: Duration,
}

impl Default for PollTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            retry: Duration::from_secs(15),
        }
    }
}

pub struct Subscription {
    feed_id: String,
    source: Arc<dyn FeedSource>,
    timing: PollTiming,
    /// `None` until the first item has been evaluated.
    last_seen: Option<i64>,
}

impl Subscription {
    pub fn new(feed_id: impl Into<String>, source: Arc<dyn FeedSource>, timing: PollTiming) -> Self {
        Self {
            feed_id: feed_id.into(),
            source,
            timing,
            last_seen: None,
        }
    }

    pub fn last_seen(&self) -> Option<i64> {
        self.last_seen
    }

    /// Dispatch decision plus advance: true when `item` should be announced.
    pub fn observe(&mut self, item: &Item) -> bool {
        let fresh = match self.last_seen {
            None => true,
            Some(seen) => seen != item.published,
        };
        self.last_seen = Some(item.published);
        fresh
    }

    /// Runs until shutdown is signalled or the dispatch queue is closed.
    pub async fn run(
        mut self,
        queue: mpsc::UnboundedSender<Detection>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        tracing::info!(feed = %self.feed_id, "subscription started");

        loop {
            let Some(item) = self.latest_item(&mut shutdown).await else {
                break;
            };

            if self.observe(&item) {
                tracing::info!(feed = %self.feed_id, item = %item.id, published = item.published, "new item detected");
                let detection = Detection {
                    feed: self.feed_id.clone(),
                    item,
                };
                if queue.send(detection).is_err() {
                    tracing::warn!(feed = %self.feed_id, "{}", logs::DISPATCH_QUEUE_CLOSED);
                    break;
                }
            } else {
                tracing::debug!(feed = %self.feed_id, item = %item.id, last_seen = ?self.last_seen(), "no new item");
            }

            if !pause(self.timing.interval, &mut shutdown).await {
                break;
            }
        }

        tracing::info!(feed = %self.feed_id, "subscription stopped");
    }

    /// Polls until the feed yields at least one item. `None` means shutdown.
    async fn latest_item(&self, shutdown: &mut watch::Receiver<bool>) -> Option<Item> {
        loop {
            if is_shut_down(shutdown) {
                return None;
            }

            let fetched = tokio::select! {
                fetched = self.source.fetch(&self.feed_id) => fetched,
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        return None;
                    }
                    continue;
                }
            };

            let wait = match fetched {
                Ok(items) => match items.into_iter().next() {
                    Some(item) => return Some(item),
                    None => {
                        tracing::debug!(feed = %self.feed_id, "feed returned no items, retrying");
                        self.timing.retry
                    }
                },
                Err(e) => {
                    tracing::warn!(feed = %self.feed_id, error = %e, "fetch failed");
                    self.timing.interval
                }
            };

            if !pause(wait, shutdown).await {
                return None;
            }
        }
    }
}

fn is_shut_down(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

/// Sleeps for `duration`. Returns false if shutdown was requested meanwhile.
async fn pause(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if is_shut_down(shutdown) {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        changed = shutdown.changed() => changed.is_ok() && !is_shut_down(shutdown),
    }
}
