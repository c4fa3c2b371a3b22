//! # File Recipient Directory
//!
//! Persists recipient groups as a JSON document (default `data/servers.json`):
//!
//! ```json
//! { "servers": [ { "server": "group-id", "services": [
//!     { "id": "...", "categoryId": "gundem", "channelId": "!room:hs", "roleId": "@room" }
//! ] } ] }
//! ```
//!
//! The engine only reads it; the `bind` / `unbind` CLI commands write it.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::errors::DirectoryError;
use crate::domain::traits::RecipientDirectory;
use crate::domain::types::{RecipientBinding, RecipientGroup};

/// One stored binding; shared with the Redis backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    #[serde(default)]
    pub id: String,
    pub category_id: String,
    pub channel_id: String,
    #[serde(default)]
    pub role_id: String,
}

impl ServiceData {
    pub fn into_binding(self, group: &str) -> RecipientBinding {
        RecipientBinding {
            group: group.to_string(),
            feed: self.category_id,
            destination: self.channel_id,
            mention: self.role_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerRecord {
    server: String,
    #[serde(default)]
    services: Vec<ServiceData>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ServersDocument {
    #[serde(default)]
    servers: Vec<ServerRecord>,
}

impl ServersDocument {
    fn into_groups(self) -> Vec<RecipientGroup> {
        self.servers
            .into_iter()
            .map(|record| {
                let bindings = record
                    .services
                    .into_iter()
                    .map(|service| service.into_binding(&record.server))
                    .collect();
                RecipientGroup {
                    id: record.server,
                    bindings,
                }
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("group {group} already has a binding for feed {feed}")]
    AlreadyBound { group: String, feed: String },

    #[error("group {group} has no binding for feed {feed}")]
    NotBound { group: String, feed: String },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub struct FileDirectory {
    path: PathBuf,
}

impl FileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<ServersDocument, DirectoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(ServersDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServersDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &ServersDocument) -> Result<(), DirectoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(document)?;
        // Readers must never observe a half-written document.
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, content).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    /// Adds a binding. A group may hold at most one binding per feed.
    pub async fn bind(&self, binding: &RecipientBinding) -> Result<(), BindError> {
        let mut document = self.load().await?;

        let position = document.servers.iter().position(|s| s.server == binding.group);
        let record = match position {
            Some(index) => &mut document.servers[index],
            None => {
                document.servers.push(ServerRecord {
                    server: binding.group.clone(),
                    services: Vec::new(),
                });
                let last = document.servers.len() - 1;
                &mut document.servers[last]
            }
        };

        if record.services.iter().any(|s| s.category_id == binding.feed) {
            return Err(BindError::AlreadyBound {
                group: binding.group.clone(),
                feed: binding.feed.clone(),
            });
        }
        record.services.push(ServiceData {
            id: service_id(),
            category_id: binding.feed.clone(),
            channel_id: binding.destination.clone(),
            role_id: binding.mention.clone(),
        });

        self.save(&document).await?;
        Ok(())
    }

    /// Removes the binding of `feed` from `group`, dropping empty groups.
    pub async fn unbind(&self, group: &str, feed: &str) -> Result<(), BindError> {
        let mut document = self.load().await?;
        let not_bound = || BindError::NotBound {
            group: group.to_string(),
            feed: feed.to_string(),
        };

        let record = document
            .servers
            .iter_mut()
            .find(|s| s.server == group)
            .ok_or_else(not_bound)?;
        let before = record.services.len();
        record.services.retain(|s| s.category_id != feed);
        if record.services.len() == before {
            return Err(not_bound());
        }

        document.servers.retain(|s| !s.services.is_empty());
        self.save(&document).await?;
        Ok(())
    }
}

fn service_id() -> String {
    ulid::Ulid::new().to_string().to_lowercase()
}

#[async_trait]
impl RecipientDirectory for FileDirectory {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError> {
        Ok(self.load().await?.into_groups())
    }
}
