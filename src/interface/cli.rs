//! # Command Line
//!
//! Argument parsing for the `feedcast` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "feedcast", version, about = "Announces new feed items in Matrix rooms")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Poll every feed and announce new items (default)
    Run,
    /// List the registered feeds
    Feeds,
    /// List recipient groups and their bindings
    Groups,
    /// Bind a feed to a room for a recipient group
    Bind {
        group: String,
        feed: String,
        /// Matrix room id, e.g. !abc:example.org
        room: String,
        /// User id to mention, or "@room"
        #[arg(default_value = "@room")]
        mention: String,
    },
    /// Remove a group's binding for a feed
    Unbind { group: String, feed: String },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::parse_from(["feedcast"]);
        assert_eq!(cli.command(), Command::Run);
        assert_eq!(cli.config, PathBuf::from("data/config.yaml"));
    }

    #[test]
    fn test_bind_arguments() {
        let cli = Cli::parse_from(["feedcast", "-c", "conf.yaml", "bind", "G1", "gundem", "!a:hs"]);
        assert_eq!(cli.config, PathBuf::from("conf.yaml"));
        assert_eq!(
            cli.command(),
            Command::Bind {
                group: "G1".to_string(),
                feed: "gundem".to_string(),
                room: "!a:hs".to_string(),
                mention: "@room".to_string(),
            }
        );
    }
}
