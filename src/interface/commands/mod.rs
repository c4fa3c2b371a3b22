//! # Command Handlers
//!
//! One module per group of subcommands. Handlers print their output and
//! return `anyhow::Result` so `main` can report failures uniformly.

pub mod bindings;
pub mod feeds;
pub mod run;
