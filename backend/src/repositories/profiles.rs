//! Gamification profile repository

use crate::db::Store;
use chrono::{DateTime, Utc};
use fitcoach_shared::models::GamificationProfile;
use uuid::Uuid;

/// Profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// Get a profile by user ID
    pub async fn get(store: &Store, user_id: Uuid) -> Option<GamificationProfile> {
        store.profiles.read().await.get(&user_id).cloned()
    }

    /// Get a profile, creating an empty one on first access
    pub async fn get_or_create(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> GamificationProfile {
        if let Some(profile) = Self::get(store, user_id).await {
            return profile;
        }

        store
            .profiles
            .write()
            .await
            .entry(user_id)
            .or_insert_with(|| GamificationProfile::new(user_id, now))
            .clone()
    }

    /// Apply a change to a profile under the write lock
    ///
    /// Creates the profile first if it does not exist. The closure decides
    /// whether anything changed; on `Err` the profile is left untouched.
    pub async fn update<T, E, F>(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
        change: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut GamificationProfile) -> Result<T, E>,
    {
        let mut profiles = store.profiles.write().await;
        let stored = profiles
            .entry(user_id)
            .or_insert_with(|| GamificationProfile::new(user_id, now));

        let mut working = stored.clone();
        let result = change(&mut working)?;
        *stored = working;

        Ok(result)
    }

    /// Apply a change that cannot be refused
    pub async fn update_with<T, F>(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
        change: F,
    ) -> T
    where
        F: FnOnce(&mut GamificationProfile) -> T,
    {
        let mut profiles = store.profiles.write().await;
        let profile = profiles
            .entry(user_id)
            .or_insert_with(|| GamificationProfile::new(user_id, now));

        change(profile)
    }

    /// All profiles ordered by lifetime points, highest first
    ///
    /// Ties are broken by user ID so the order is stable.
    pub async fn list_ranked(store: &Store) -> Vec<GamificationProfile> {
        let mut profiles: Vec<_> = store.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| {
            b.total_points_earned
                .cmp(&a.total_points_earned)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        profiles
    }

    /// Set the rank of every profile in one pass
    pub async fn assign_ranks(store: &Store, ranking: &[(Uuid, u32)]) -> usize {
        let mut profiles = store.profiles.write().await;
        let mut updated = 0;
        for (user_id, rank) in ranking {
            if let Some(profile) = profiles.get_mut(user_id) {
                profile.rank = Some(*rank);
                updated += 1;
            }
        }
        updated
    }
}
