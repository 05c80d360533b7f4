//! Mineral storage
//!
//! Handlers only see the [`MineralStore`] trait. The service ships an
//! in-memory implementation, optionally seeded from a JSON file containing an
//! array of [`NewMineral`] objects. Each user's favorites live next to the
//! minerals so deleting a mineral also drops it from every favorites list.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Mineral, NewMineral};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(i64),
    /// Storage backend failure
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "mineral {} not found", id),
            StoreError::Backend(msg) => write!(f, "storage error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait MineralStore: Send + Sync {
    /// All minerals ordered by id
    async fn all(&self) -> StoreResult<Vec<Mineral>>;

    async fn get(&self, id: i64) -> StoreResult<Mineral>;

    async fn create(&self, mineral: NewMineral) -> StoreResult<Mineral>;

    /// Replace the record with `mineral.id`
    async fn update(&self, mineral: Mineral) -> StoreResult<Mineral>;

    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Mark `mineral_id` as a favorite of `user_id`. Adding twice is a no-op.
    async fn add_favorite(&self, user_id: i64, mineral_id: i64) -> StoreResult<()>;

    async fn remove_favorite(&self, user_id: i64, mineral_id: i64) -> StoreResult<()>;

    /// Favorite mineral ids of `user_id`, ascending
    async fn favorites(&self, user_id: i64) -> StoreResult<Vec<i64>>;
}

#[derive(Debug, Default)]
struct Inner {
    minerals: BTreeMap<i64, Mineral>,
    last_id: i64,
    favorites: HashMap<i64, BTreeSet<i64>>,
}

#[derive(Debug, Default)]
pub struct InMemoryMineralStore {
    inner: RwLock<Inner>,
}

impl InMemoryMineralStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `seed`, in order. Every entry must pass validation.
    pub async fn with_minerals(seed: Vec<NewMineral>) -> StoreResult<Self> {
        validate_seed(&seed)?;
        let store = Self::new();
        for mineral in seed {
            store.create(mineral).await?;
        }
        Ok(store)
    }

    /// Read and validate seed minerals from a JSON file
    pub fn load_seed(path: &Path) -> StoreResult<Vec<NewMineral>> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Backend(format!("{}: {}", path.display(), e)))?;
        let seed: Vec<NewMineral> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Backend(format!("{}: {}", path.display(), e)))?;
        validate_seed(&seed)
            .map_err(|e| StoreError::Backend(format!("{}: {}", path.display(), e)))?;
        Ok(seed)
    }
}

fn validate_seed(seed: &[NewMineral]) -> StoreResult<()> {
    for (index, mineral) in seed.iter().enumerate() {
        mineral.validate().map_err(|e| {
            StoreError::Backend(format!("seed entry {} ({:?}): {}", index, mineral.title, e))
        })?;
    }
    Ok(())
}

#[async_trait]
impl MineralStore for InMemoryMineralStore {
    async fn all(&self) -> StoreResult<Vec<Mineral>> {
        Ok(self.inner.read().await.minerals.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Mineral> {
        self.inner
            .read()
            .await
            .minerals
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, mineral: NewMineral) -> StoreResult<Mineral> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let created = Mineral {
            id: inner.last_id,
            title: mineral.title,
            description: mineral.description,
            model_path: mineral.model_path,
            preview_image_path: mineral.preview_image_path,
            created_at: Utc::now(),
        };
        inner.minerals.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, mineral: Mineral) -> StoreResult<Mineral> {
        let mut inner = self.inner.write().await;
        match inner.minerals.get_mut(&mineral.id) {
            Some(existing) => {
                *existing = mineral.clone();
                Ok(mineral)
            }
            None => Err(StoreError::NotFound(mineral.id)),
        }
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.minerals.remove(&id).ok_or(StoreError::NotFound(id))?;
        for favorites in inner.favorites.values_mut() {
            favorites.remove(&id);
        }
        Ok(())
    }

    async fn add_favorite(&self, user_id: i64, mineral_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.minerals.contains_key(&mineral_id) {
            return Err(StoreError::NotFound(mineral_id));
        }
        inner.favorites.entry(user_id).or_default().insert(mineral_id);
        Ok(())
    }

    async fn remove_favorite(&self, user_id: i64, mineral_id: i64) -> StoreResult<()> {
        if let Some(favorites) = self.inner.write().await.favorites.get_mut(&user_id) {
            favorites.remove(&mineral_id);
        }
        Ok(())
    }

    async fn favorites(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        Ok(self
            .inner
            .read()
            .await
            .favorites
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}
