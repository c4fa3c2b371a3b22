//! Inspecting and editing recipient bindings from the command line.
//!
//! Writes go through the file directory only; a Redis-backed directory is
//! managed by whatever service owns that hash.

use anyhow::{Result, bail};

use crate::domain::config::{DirectoryBackend, DirectoryConfig};
use crate::domain::registry::FeedRegistry;
use crate::domain::traits::RecipientDirectory;
use crate::domain::types::{RecipientBinding, RecipientGroup};
use crate::infrastructure::store::FileDirectory;
use crate::strings::messages;

pub fn group_lines(groups: &[RecipientGroup]) -> Vec<String> {
    let lines: Vec<String> = groups
        .iter()
        .flat_map(|group| {
            group.bindings.iter().map(|b| {
                messages::binding_line(&group.id, &b.feed, &b.destination, &b.mention)
            })
        })
        .collect();

    if lines.is_empty() {
        vec![messages::NO_BINDINGS.to_string()]
    } else {
        lines
    }
}

pub async fn handle_groups(directory: &dyn RecipientDirectory) -> Result<()> {
    let groups = directory.list_groups().await?;
    for line in group_lines(&groups) {
        println!("{line}");
    }
    Ok(())
}

fn writable_directory(config: &DirectoryConfig) -> Result<FileDirectory> {
    match config.backend {
        DirectoryBackend::File => Ok(FileDirectory::new(&config.path)),
        DirectoryBackend::Redis => {
            bail!("Bindings can only be edited with the file directory backend")
        }
    }
}

pub async fn handle_bind(
    config: &DirectoryConfig,
    registry: &FeedRegistry,
    binding: RecipientBinding,
) -> Result<String> {
    if !registry.contains(&binding.feed) {
        bail!(messages::unknown_feed(&binding.feed));
    }
    let directory = writable_directory(config)?;
    directory.bind(&binding).await?;
    tracing::info!(
        "Bound feed {} to {} for group {}",
        binding.feed,
        binding.destination,
        binding.group
    );
    Ok(messages::binding_saved(&binding.group, &binding.feed))
}

pub async fn handle_unbind(config: &DirectoryConfig, group: &str, feed: &str) -> Result<String> {
    let directory = writable_directory(config)?;
    directory.unbind(group, feed).await?;
    tracing::info!("Unbound feed {} from group {}", feed, group);
    Ok(messages::binding_removed(group, feed))
}
