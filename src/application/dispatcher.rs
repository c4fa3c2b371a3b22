//! # Fan-out Dispatcher
//!
//! Delivers one detected item to every recipient group bound to its feed.
//! Each delivery runs as its own task, so a slow, missing or failing room never
//! holds up the others, and none of them holds up the caller.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::formatter;
use crate::application::history::DedupHistory;
use crate::domain::errors::{DeliveryError, DirectoryError, ResolveError};
use crate::domain::traits::{Destinations, RecipientDirectory};
use crate::domain::types::{Item, Notification, RecipientBinding};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The destination could not be resolved to a writable room.
    Skipped(ResolveError),
    Failed(DeliveryError),
}

/// A spawned delivery. Dropping it detaches the task.
pub struct Delivery {
    pub group: String,
    pub destination: String,
    pub handle: JoinHandle<DeliveryOutcome>,
}

pub enum DispatchReport {
    /// The item was already fanned out earlier.
    Duplicate,
    FannedOut { deliveries: Vec<Delivery> },
}

#[derive(Clone)]
pub struct FanoutDispatcher {
    history: Arc<DedupHistory>,
    directory: Arc<dyn RecipientDirectory>,
    destinations: Arc<dyn Destinations>,
}

impl FanoutDispatcher {
    pub fn new(
        history: Arc<DedupHistory>,
        directory: Arc<dyn RecipientDirectory>,
        destinations: Arc<dyn Destinations>,
    ) -> Self {
        Self {
            history,
            directory,
            destinations,
        }
    }

    pub fn history(&self) -> &DedupHistory {
        &self.history
    }

    /// Spawns one delivery per group bound to `feed_id` and returns without
    /// waiting for them.
    ///
    /// The item is recorded as seen before the directory is consulted, so a
    /// directory failure drops the notification for good.
    pub async fn dispatch(&self, item: &Item, feed_id: &str) -> Result<DispatchReport, DirectoryError> {
        if !self.history.insert(&item.id) {
            tracing::debug!(feed = %feed_id, item = %item.id, "item already dispatched");
            return Ok(DispatchReport::Duplicate);
        }

        let groups = self.directory.list_groups().await.inspect_err(|e| {
            tracing::error!(feed = %feed_id, item = %item.id, error = %e, "recipient lookup failed");
        })?;

        let deliveries: Vec<Delivery> = groups
            .iter()
            .filter_map(|group| group.binding_for(feed_id))
            .map(|binding| {
                let notification = formatter::render(item, &binding.mention);
                Delivery {
                    group: binding.group.clone(),
                    destination: binding.destination.clone(),
                    handle: tokio::spawn(deliver(
                        self.destinations.clone(),
                        binding.clone(),
                        notification,
                    )),
                }
            })
            .collect();

        tracing::info!(
            feed = %feed_id,
            item = %item.id,
            groups = groups.len(),
            deliveries = deliveries.len(),
            "item fanned out"
        );
        Ok(DispatchReport::FannedOut { deliveries })
    }
}

async fn deliver(
    destinations: Arc<dyn Destinations>,
    binding: RecipientBinding,
    notification: Notification,
) -> DeliveryOutcome {
    let room = match destinations.resolve(&binding.destination).await {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!(group = %binding.group, feed = %binding.feed, error = %e, "destination skipped");
            return DeliveryOutcome::Skipped(e);
        }
    };

    match room.send_notification(&notification.text).await {
        Ok(()) => {
            tracing::debug!(group = %binding.group, room = %room.room_id(), "notification delivered");
            DeliveryOutcome::Delivered
        }
        Err(e) => {
            tracing::warn!(group = %binding.group, room = %room.room_id(), error = %e, "notification delivery failed");
            DeliveryOutcome::Failed(e)
        }
    }
}
