//! # Strings Module
//!
//! Centralizes user-facing strings, post templates, and log messages.
//! Ensures consistency in messaging and easier localization/updates.

pub mod logs;
pub mod messages;
