//! Reward repository

use crate::db::Store;
use chrono::{DateTime, Utc};
use fitcoach_shared::models::{Reward, RewardBlock};
use fitcoach_shared::types::CreateReward;
use uuid::Uuid;

/// Reward repository
pub struct RewardRepository;

impl RewardRepository {
    /// Create a new reward
    pub async fn create(store: &Store, input: CreateReward, now: DateTime<Utc>) -> Reward {
        let reward = Reward {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            category: input.category,
            fit_coin_cost: input.fit_coin_cost,
            tier: input.tier,
            availability: input.availability,
            max_redemptions: input.max_redemptions,
            current_redemptions: 0,
            image_url: input.image_url,
            is_active: true,
            valid_from: input.valid_from,
            valid_until: input.valid_until,
            created_by: input.created_by,
            created_at: now,
        };

        store.rewards.write().await.insert(reward.id, reward.clone());
        reward
    }

    /// Get a reward by ID
    pub async fn get(store: &Store, id: Uuid) -> Option<Reward> {
        store.rewards.read().await.get(&id).cloned()
    }

    /// All rewards, cheapest first
    pub async fn list(store: &Store) -> Vec<Reward> {
        let mut rewards: Vec<_> = store.rewards.read().await.values().cloned().collect();
        rewards.sort_by(|a, b| {
            a.fit_coin_cost
                .cmp(&b.fit_coin_cost)
                .then_with(|| a.title.cmp(&b.title))
        });
        rewards
    }

    /// Turn a reward on or off
    pub async fn set_active(store: &Store, id: Uuid, active: bool) -> Option<Reward> {
        let mut rewards = store.rewards.write().await;
        let reward = rewards.get_mut(&id)?;
        reward.is_active = active;
        Some(reward.clone())
    }

    /// Claim one redemption slot if the reward is currently redeemable
    ///
    /// Returns `None` for an unknown reward.
    pub async fn reserve(
        store: &Store,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Option<Result<Reward, RewardBlock>> {
        let mut rewards = store.rewards.write().await;
        let reward = rewards.get_mut(&id)?;

        if let Some(block) = reward.redemption_block(now) {
            return Some(Err(block));
        }

        reward.current_redemptions += 1;
        Some(Ok(reward.clone()))
    }

    /// Give back a slot claimed by [`RewardRepository::reserve`]
    pub async fn release(store: &Store, id: Uuid) {
        if let Some(reward) = store.rewards.write().await.get_mut(&id) {
            reward.current_redemptions = reward.current_redemptions.saturating_sub(1);
        }
    }
}
