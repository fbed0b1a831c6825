//! Developer repository port and the in-memory adapter used by tests and
//! local runs without PostgreSQL.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::core::{rank_nearby, ProximityQuery};
use crate::models::Dev;

/// Errors that can occur when reading or writing developers
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

#[async_trait]
pub trait DevRepository: Send + Sync {
    /// Fetch a developer by GitHub username.
    async fn find_by_github_username(&self, username: &str) -> Result<Option<Dev>, StoreError>;

    /// Insert a developer. Returns `false` when the GitHub username is taken.
    async fn insert(&self, dev: &Dev) -> Result<bool, StoreError>;

    /// All developers, oldest first.
    async fn list(&self) -> Result<Vec<Dev>, StoreError>;

    /// Developers inside the query radius with matching techs, nearest first.
    async fn search(&self, query: &ProximityQuery) -> Result<Vec<Dev>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// In-memory developer store
#[derive(Debug, Default)]
pub struct InMemoryDevStore {
    devs: RwLock<Vec<Dev>>,
}

impl InMemoryDevStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_devs(devs: Vec<Dev>) -> Self {
        Self { devs: RwLock::new(devs) }
    }
}

#[async_trait]
impl DevRepository for InMemoryDevStore {
    async fn find_by_github_username(&self, username: &str) -> Result<Option<Dev>, StoreError> {
        let devs = self.devs.read().await;
        Ok(devs.iter().find(|d| d.github_username == username).cloned())
    }

    async fn insert(&self, dev: &Dev) -> Result<bool, StoreError> {
        let mut devs = self.devs.write().await;
        if devs.iter().any(|d| d.github_username == dev.github_username) {
            return Ok(false);
        }
        devs.push(dev.clone());
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<Dev>, StoreError> {
        Ok(self.devs.read().await.clone())
    }

    async fn search(&self, query: &ProximityQuery) -> Result<Vec<Dev>, StoreError> {
        let candidates = self.devs.read().await.clone();
        Ok(rank_nearby(query, candidates))
    }
}
