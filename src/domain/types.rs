//! # Domain Types
//!
//! Feeds, items and recipient bindings shared across the application logic.

use serde::{Deserialize, Serialize};

/// A named source of time-ordered items. Defined once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// One published unit of content, as reported by a `FeedSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Publication timestamp. Only compared for equality.
    pub published: i64,
    #[serde(default)]
    pub media: Option<String>,
}

/// Maps one feed to a destination room and the target mentioned in each post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientBinding {
    pub group: String,
    pub feed: String,
    pub destination: String,
    pub mention: String,
}

/// A recipient group (one chat server / community) and its bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientGroup {
    pub id: String,
    #[serde(default)]
    pub bindings: Vec<RecipientBinding>,
}

impl RecipientGroup {
    /// First binding for `feed`. Upstream allows at most one per feed.
    pub fn binding_for(&self, feed: &str) -> Option<&RecipientBinding> {
        self.bindings.iter().find(|b| b.feed == feed)
    }
}

/// Emitted by a subscription when its leading item should be announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub feed: String,
    pub item: Item,
}

/// Rendered message body, ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
}
