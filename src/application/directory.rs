//! # Cached Recipient Directory
//!
//! Memoises `list_groups` so that a burst of detections across feeds does not
//! hit the backing store once per item. Errors are not cached.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::cache::Cache;
use crate::domain::errors::DirectoryError;
use crate::domain::traits::RecipientDirectory;
use crate::domain::types::RecipientGroup;

const GROUPS_KEY: &str = "groups";

pub struct CachedDirectory {
    inner: Arc<dyn RecipientDirectory>,
    cache: Cache<Vec<RecipientGroup>>,
}

impl CachedDirectory {
    pub fn new(inner: Arc<dyn RecipientDirectory>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Cache::new(ttl),
        }
    }

    /// Wraps `inner` unless `ttl` is zero.
    pub fn wrap(inner: Arc<dyn RecipientDirectory>, ttl: Duration) -> Arc<dyn RecipientDirectory> {
        if ttl.is_zero() {
            inner
        } else {
            Arc::new(Self::new(inner, ttl))
        }
    }

    pub fn invalidate(&self) {
        self.cache.clear();
    }
}

#[async_trait]
impl RecipientDirectory for CachedDirectory {
    async fn list_groups(&self) -> Result<Vec<RecipientGroup>, DirectoryError> {
        if let Some(groups) = self.cache.get(GROUPS_KEY) {
            return Ok(groups);
        }
        let groups = self.inner.list_groups().await?;
        self.cache.set(GROUPS_KEY, groups.clone());
        Ok(groups)
    }
}
