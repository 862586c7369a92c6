//! Athlete directory repository
//!
//! The user store is owned elsewhere; this keeps only what the leaderboard
//! needs: display names and trainer assignments.

use crate::db::Store;
use fitcoach_shared::models::Athlete;
use uuid::Uuid;

/// Athlete directory repository
pub struct AthleteRepository;

impl AthleteRepository {
    /// Insert or replace an athlete entry
    pub async fn upsert(store: &Store, athlete: Athlete) {
        store.athletes.write().await.insert(athlete.id, athlete);
    }

    /// Get an athlete by ID
    pub async fn get(store: &Store, id: Uuid) -> Option<Athlete> {
        store.athletes.read().await.get(&id).cloned()
    }

    /// IDs of all athletes coached by a trainer
    pub async fn ids_for_trainer(store: &Store, trainer_id: Uuid) -> Vec<Uuid> {
        store
            .athletes
            .read()
            .await
            .values()
            .filter(|a| a.trainer_id == Some(trainer_id))
            .map(|a| a.id)
            .collect()
    }
}
