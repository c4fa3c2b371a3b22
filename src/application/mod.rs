//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes the per-feed subscriptions, dedup history, fan-out dispatch and the engine wiring them.

pub mod cache;
pub mod directory;
pub mod dispatcher;
pub mod engine;
pub mod formatter;
pub mod history;
pub mod subscription;
#[cfg(test)]
pub mod testing;
