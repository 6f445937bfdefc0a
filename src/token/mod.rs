//! Durable key-value storage for the access and refresh tokens
//!
//! Tokens live under the fixed keys [`ACCESS_KEY`] and [`REFRESH_KEY`]. The
//! store is opaque: callers only get, set and remove strings.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use crate::config::write_private;
use crate::error::{ConfigError, Result};

pub mod jwt;

/// Storage key of the short-lived access token
pub const ACCESS_KEY: &str = "access";

/// Storage key of the long-lived refresh token
pub const REFRESH_KEY: &str = "refresh";

/// Access/refresh token pair as returned by `login/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Key-value token persistence
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;

    /// Stored access token, if any
    async fn access(&self) -> Result<Option<String>> {
        self.get(ACCESS_KEY).await
    }

    /// Stored refresh token, if any
    async fn refresh(&self) -> Result<Option<String>> {
        self.get(REFRESH_KEY).await
    }

    /// Persist both tokens after a login
    async fn store_pair(&self, pair: &TokenPair) -> Result<()> {
        self.set(REFRESH_KEY, &pair.refresh).await?;
        self.set(ACCESS_KEY, &pair.access).await
    }

    /// Forget both tokens
    async fn clear(&self) -> Result<()> {
        self.remove(ACCESS_KEY).await?;
        self.remove(REFRESH_KEY).await
    }
}

/// Token store backed by a YAML map on disk (mode 0600)
pub struct FileTokenStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let map = serde_yaml::from_str::<Option<BTreeMap<String, String>>>(&contents)
            .map_err(ConfigError::from)?;
        Ok(map.unwrap_or_default())
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let contents =
            serde_yaml::to_string(map).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        write_private(&self.path, &contents)
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.read_map()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        debug!("Stored '{}' token in {}", key, self.path.display());
        self.write_map(&map)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            debug!("Removed '{}' token from {}", key, self.path.display());
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-process token store
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    values: RwLock<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token pair
    pub fn with_pair(access: Option<&str>, refresh: Option<&str>) -> Self {
        let mut values = BTreeMap::new();
        if let Some(a) = access {
            values.insert(ACCESS_KEY.to_string(), a.to_string());
        }
        if let Some(r) = refresh {
            values.insert(REFRESH_KEY.to_string(), r.to_string());
        }
        Self {
            values: RwLock::new(values),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
