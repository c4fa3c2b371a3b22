//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (FeedSource, RecipientDirectory, Destinations).

pub mod http;
pub mod matrix;
#[cfg(feature = "redis")]
pub mod redis_store;
pub mod store;
