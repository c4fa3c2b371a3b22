//! # Feed Registry
//!
//! The fixed set of feeds known for the lifetime of the process, built once
//! from configuration. Each id gets exactly one subscription.

use std::collections::HashSet;

use thiserror::Error;

use super::types::Feed;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate feed id: {0}")]
    DuplicateFeed(String),

    #[error("feed id must not be empty")]
    EmptyId,
}

#[derive(Debug, Clone, Default)]
pub struct FeedRegistry {
    feeds: Vec<Feed>,
}

impl FeedRegistry {
    pub fn new(feeds: Vec<Feed>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for feed in &feeds {
            if feed.id.trim().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if !seen.insert(feed.id.as_str()) {
                return Err(RegistryError::DuplicateFeed(feed.id.clone()));
            }
        }
        Ok(Self { feeds })
    }

    pub fn get(&self, id: &str) -> Option<&Feed> {
        self.feeds.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feed> {
        self.feeds.iter()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}
