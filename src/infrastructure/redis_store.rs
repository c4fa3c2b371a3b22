//! # Redis Recipient Directory
//!
//! Reads recipient groups from a Redis hash: field = group id, value = JSON
//! list of stored bindings (same shape as the file backend's `services`).

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::errors::DirectoryError;
use crate::domain::traits::RecipientDirectory;
use crate::domain::types::RecipientGroup;
use crate::infrastructure::store::ServiceData;

pub struct RedisDirectory {
    conn: ConnectionManager,
    key: String,
}

impl RedisDirectory {
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url).context("Invalid Redis URL")?;
        let conn = client
            .get_connection_manager()
            .await
            .context("Failed to connect to Redis")?;
        Ok(Self {
            conn,
            key: key.into(),
        })
    }
}

fn decode_groups(raw: HashMap<String, String>) -> Result<Vec<RecipientGroup>, DirectoryError> {
    let mut groups = Vec::with_capacity(raw.len());
    for (group, json) in raw {
        let services: Vec<ServiceData> = serde_json::from_str(&json)?;
        let bindings = services.into_iter().map(|s| s.into_binding(&group)).collect();
        groups.push(RecipientGroup { id: group, bindings });
    }
    groups.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(groups)
}

#[async_trait]
impl RecipientDirectory for RedisDirectory {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError> {
        let mut conn = self.conn.clone();
        let raw: HashMap<String, String> = conn
            .hgetall(&self.key)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?;
        decode_groups(raw)
    }
}
