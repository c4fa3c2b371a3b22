//! # Notification Engine
//!
//! Wires the pieces together: one `Subscription` task per registered feed, all
//! feeding a single unbounded dispatch queue, and a dispatch task that hands
//! every detection to the `FanoutDispatcher` on its own task.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::application::dispatcher::FanoutDispatcher;
use crate::application::subscription::{PollTiming, Subscription};
use crate::domain::registry::FeedRegistry;
use crate::domain::traits::FeedSource;
use crate::domain::types::Detection;
use crate::strings::logs;

/// Running engine.
/// - dropping the handle (or `request_shutdown`) stops every subscription
/// - `shutdown_and_join()` waits for the loops; in-flight deliveries are abandoned
pub struct EngineHandle {
    shutdown_tx: watch::Sender<bool>,
    joins: Vec<JoinHandle<()>>,
}

impl EngineHandle {
    pub fn request_shutdown(&self) {
        // receivers may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for join in self.joins {
            if let Err(e) = join.await {
                tracing::error!("engine task panicked: {}", e);
            }
        }
        tracing::info!("{}", logs::ENGINE_STOPPED);
    }

    /// Number of spawned subscription loops.
    pub fn subscriptions(&self) -> usize {
        self.joins.len().saturating_sub(1)
    }
}

pub struct Engine;

impl Engine {
    pub fn start(
        registry: &FeedRegistry,
        timing: PollTiming,
        source: Arc<dyn FeedSource>,
        dispatcher: FanoutDispatcher,
    ) -> EngineHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();

        let mut joins = Vec::with_capacity(registry.len() + 1);
        for feed in registry.iter() {
            let subscription = Subscription::new(feed.id.clone(), source.clone(), timing);
            joins.push(tokio::spawn(
                subscription.run(queue_tx.clone(), shutdown_rx.clone()),
            ));
        }
        // Only subscriptions hold senders, so the queue closes once they all stop.
        drop(queue_tx);

        joins.push(tokio::spawn(dispatch_loop(dispatcher, queue_rx, shutdown_rx)));

        tracing::info!("{}", logs::engine_started(registry.len()));
        EngineHandle { shutdown_tx, joins }
    }
}

async fn dispatch_loop(
    dispatcher: FanoutDispatcher,
    mut queue: mpsc::UnboundedReceiver<Detection>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        let detection = tokio::select! {
            detection = queue.recv() => match detection {
                Some(detection) => detection,
                None => break,
            },
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };

        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            // Failures are logged inside the dispatcher.
            let _ = dispatcher.dispatch(&detection.item, &detection.feed).await;
        });
    }
}
