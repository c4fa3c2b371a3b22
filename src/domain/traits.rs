//! # Domain Traits
//!
//! Abstract interfaces for the engine's collaborators (feed source, recipient
//! directory, chat destinations). Implementations live in the Infrastructure layer.

use std::sync::Arc;

use async_trait::async_trait;

use super::errors::{DeliveryError, DirectoryError, FetchError, ResolveError};
use super::types::{Item, RecipientGroup};

/// Returns the currently published items of a feed, newest first.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, feed_id: &str) -> Result<Vec<Item>, FetchError>;
}

/// Read access to the persisted recipient configuration.
#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError>;
}

/// Abstract interface for a single chat room (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a notification (not tracked/editable)
    async fn send_notification(&self, content: &str) -> Result<(), DeliveryError>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Turns a destination id from a binding into a live, writable room.
#[async_trait]
pub trait Destinations: Send + Sync {
    async fn resolve(&self, destination_id: &str) -> Result<Arc<dyn ChatProvider>, ResolveError>;
}
