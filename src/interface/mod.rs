//! # Interface Layer
//!
//! Entry points for the `feedcast` binary: argument parsing and the handlers
//! behind each subcommand.

pub mod cli;
pub mod commands;
