//! In-process store and snapshot persistence
//!
//! Profiles, rewards, badges and the athlete directory live behind
//! `tokio::sync::RwLock`s. Each repository call takes one lock, so a single
//! profile update is an atomic read-modify-write. The whole store can be
//! written to and restored from a JSON snapshot.

use anyhow::{Context, Result};
use fitcoach_shared::models::{AchievementBadge, Athlete, GamificationProfile, Reward};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Shared gamification store
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) profiles: RwLock<HashMap<Uuid, GamificationProfile>>,
    pub(crate) rewards: RwLock<HashMap<Uuid, Reward>>,
    /// Kept in insertion order so achievement checks are deterministic
    pub(crate) badges: RwLock<Vec<AchievementBadge>>,
    pub(crate) athletes: RwLock<HashMap<Uuid, Athlete>>,
}

/// Serializable image of the whole store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub profiles: Vec<GamificationProfile>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub badges: Vec<AchievementBadge>,
    #[serde(default)]
    pub athletes: Vec<Athlete>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            profiles: RwLock::new(
                snapshot
                    .profiles
                    .into_iter()
                    .map(|p| (p.user_id, p))
                    .collect(),
            ),
            rewards: RwLock::new(snapshot.rewards.into_iter().map(|r| (r.id, r)).collect()),
            badges: RwLock::new(snapshot.badges),
            athletes: RwLock::new(snapshot.athletes.into_iter().map(|a| (a.id, a)).collect()),
        }
    }

    /// Copy the current contents into a snapshot
    pub async fn snapshot(&self) -> Snapshot {
        let mut profiles: Vec<_> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by_key(|p| p.user_id);
        let mut rewards: Vec<_> = self.rewards.read().await.values().cloned().collect();
        rewards.sort_by_key(|r| r.id);
        let mut athletes: Vec<_> = self.athletes.read().await.values().cloned().collect();
        athletes.sort_by_key(|a| a.id);

        Snapshot {
            profiles,
            rewards,
            badges: self.badges.read().await.clone(),
            athletes,
        }
    }
}

/// Open the store, restoring a snapshot file when one exists
pub async fn open_store(snapshot_path: Option<&str>) -> Result<Store> {
    let Some(path) = snapshot_path else {
        info!("No snapshot configured, starting with an empty store");
        return Ok(Store::new());
    };

    if !Path::new(path).exists() {
        warn!(path, "Snapshot file not found, starting with an empty store");
        return Ok(Store::new());
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading snapshot {}", path))?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path))?;

    info!(
        path,
        profiles = snapshot.profiles.len(),
        rewards = snapshot.rewards.len(),
        badges = snapshot.badges.len(),
        "Snapshot loaded"
    );

    Ok(Store::from_snapshot(snapshot))
}

/// Write the store to a snapshot file
pub async fn save_snapshot(store: &Store, path: &str) -> Result<()> {
    let snapshot = store.snapshot().await;
    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing snapshot {}", path))?;
    info!(path, profiles = snapshot.profiles.len(), "Snapshot written");
    Ok(())
}
