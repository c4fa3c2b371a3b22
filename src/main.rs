#![recursion_limit = "256"]
//! # Main Entry Point
//!
//! Initializes the application:
//! - Domain: Configuration, Types and the feed registry
//! - Infrastructure: HTTP feed source, recipient directories, Matrix
//! - Application: Subscriptions, Dedup History, Fan-out Dispatch, Engine
//! - Interface: CLI and Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::config::AppConfig;
use crate::domain::registry::FeedRegistry;
use crate::domain::types::RecipientBinding;
use crate::interface::cli::{Cli, Command};
use crate::interface::commands::{bindings, feeds, run};
use crate::strings::logs;

const DEFAULT_FILTER: &str =
    "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&cli.config)?;

    // 2. Logging Setup
    let log_dir = Path::new(&config.system.log_dir);
    if !log_dir.exists() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = log_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", logs::config_loaded(&config.services.matrix.username));

    // 3. Feed Registry
    let registry =
        FeedRegistry::new(config.feeds.list.clone()).context("Invalid feeds.list in config")?;

    // 4. Dispatch
    match cli.command() {
        Command::Run => run::handle_run(&config, &registry).await,
        Command::Feeds => {
            feeds::handle_feeds(&registry);
            Ok(())
        }
        Command::Groups => {
            let directory = run::open_directory(&config.directory).await?;
            bindings::handle_groups(directory.as_ref()).await
        }
        Command::Bind {
            group,
            feed,
            room,
            mention,
        } => {
            let binding = RecipientBinding {
                group,
                feed,
                destination: room,
                mention,
            };
            let message = bindings::handle_bind(&config.directory, &registry, binding).await?;
            println!("{message}");
            Ok(())
        }
        Command::Unbind { group, feed } => {
            let message = bindings::handle_unbind(&config.directory, &group, &feed).await?;
            println!("{message}");
            Ok(())
        }
    }
}
