//! Achievement badge repository

use crate::db::Store;
use chrono::{DateTime, Utc};
use fitcoach_shared::models::AchievementBadge;
use fitcoach_shared::types::CreateBadge;
use uuid::Uuid;

/// Badge repository
pub struct BadgeRepository;

impl BadgeRepository {
    /// Create a new badge
    pub async fn create(store: &Store, input: CreateBadge, now: DateTime<Utc>) -> AchievementBadge {
        let badge = AchievementBadge {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            icon_url: input.icon_url,
            category: input.category,
            requirement: input.requirement,
            points_reward: input.points_reward,
            rarity: input.rarity,
            is_active: true,
            created_at: now,
        };

        store.badges.write().await.push(badge.clone());
        badge
    }

    /// Insert several badges at once, only if the catalog is empty
    ///
    /// Returns the number inserted.
    pub async fn insert_if_empty(store: &Store, badges: Vec<AchievementBadge>) -> usize {
        let mut stored = store.badges.write().await;
        if !stored.is_empty() {
            return 0;
        }
        let count = badges.len();
        stored.extend(badges);
        count
    }

    /// Number of badges, active or not
    pub async fn count(store: &Store) -> usize {
        store.badges.read().await.len()
    }

    /// Active badges in catalog order
    pub async fn list_active(store: &Store) -> Vec<AchievementBadge> {
        store
            .badges
            .read()
            .await
            .iter()
            .filter(|b| b.is_active)
            .cloned()
            .collect()
    }

    /// Badges matching the given IDs, in catalog order
    pub async fn get_many(store: &Store, ids: &[Uuid]) -> Vec<AchievementBadge> {
        store
            .badges
            .read()
            .await
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect()
    }

    /// Turn a badge on or off
    pub async fn set_active(store: &Store, id: Uuid, active: bool) -> Option<AchievementBadge> {
        let mut badges = store.badges.write().await;
        let badge = badges.iter_mut().find(|b| b.id == id)?;
        badge.is_active = active;
        Some(badge.clone())
    }
}
