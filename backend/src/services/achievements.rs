//! Achievement service
//!
//! Unlocks badges whose requirement a profile meets, reports progress
//! towards every badge and seeds the default catalog.

use crate::db::Store;
use crate::error::ServiceResult;
use crate::repositories::{BadgeRepository, ProfileRepository};
use chrono::{DateTime, Utc};
use fitcoach_shared::achievements::{default_badges, requirement_met, requirement_progress};
use fitcoach_shared::models::{
    AchievementBadge, PointTransaction, TransactionSource, TransactionType,
};
use fitcoach_shared::types::{AchievementProgress, AchievementUnlock, CreateBadge};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Achievement service
pub struct AchievementService;

impl AchievementService {
    /// Unlock every active badge the athlete now qualifies for
    ///
    /// Badges are checked in catalog order against the profile as it is
    /// updated, so points from one unlock can satisfy a later badge in the
    /// same pass. Each badge is unlocked at most once.
    pub async fn check_and_award(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<AchievementUnlock> {
        let badges = BadgeRepository::list_active(store).await;

        let unlocks = ProfileRepository::update_with(store, user_id, now, |profile| {
            let mut unlocks = Vec::new();

            for badge in &badges {
                if profile.has_achievement(badge.id)
                    || !requirement_met(profile, &badge.requirement)
                {
                    continue;
                }

                profile.achievements.push(badge.id);
                if badge.points_reward > 0 {
                    profile.credit(PointTransaction {
                        amount: badge.points_reward,
                        kind: TransactionType::Bonus,
                        source: TransactionSource::Achievement,
                        source_id: Some(badge.id.to_string()),
                        description: format!("Achievement unlocked: {}", badge.name),
                        created_at: now,
                    });
                }

                unlocks.push(AchievementUnlock {
                    achievement_id: badge.id,
                    name: badge.name.clone(),
                    description: badge.description.clone(),
                    points_awarded: badge.points_reward,
                    rarity: badge.rarity,
                    icon_url: badge.icon_url.clone(),
                });
            }

            unlocks
        })
        .await;

        for unlock in &unlocks {
            if unlock.points_awarded > 0 {
                metrics::counter!(
                    "fitcoach_points_awarded_total",
                    "source" => TransactionSource::Achievement.as_str()
                )
                .increment(unlock.points_awarded as u64);
            }
            info!(
                user_id = %user_id,
                achievement = %unlock.name,
                points = unlock.points_awarded,
                "Achievement unlocked"
            );
        }

        unlocks
    }

    /// Every active badge with the athlete's progress towards it
    pub async fn achievements_with_progress(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<AchievementProgress> {
        let profile = ProfileRepository::get_or_create(store, user_id, now).await;

        BadgeRepository::list_active(store)
            .await
            .into_iter()
            .map(|badge| {
                let unlocked = profile.has_achievement(badge.id);
                let unlocked_at = if unlocked {
                    let id = badge.id.to_string();
                    profile
                        .point_transactions
                        .iter()
                        .find(|t| {
                            t.source == TransactionSource::Achievement
                                && t.source_id.as_deref() == Some(id.as_str())
                        })
                        .map(|t| t.created_at)
                } else {
                    None
                };
                let (progress, progress_max) = requirement_progress(&profile, &badge.requirement);

                AchievementProgress {
                    achievement: badge,
                    unlocked,
                    unlocked_at,
                    progress,
                    progress_max,
                }
            })
            .collect()
    }

    /// Badges the athlete has unlocked
    pub async fn unlocked_achievements(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Vec<AchievementBadge> {
        let profile = ProfileRepository::get_or_create(store, user_id, now).await;
        if profile.achievements.is_empty() {
            return Vec::new();
        }
        BadgeRepository::get_many(store, &profile.achievements).await
    }

    /// Add a badge to the catalog
    pub async fn create_badge(
        store: &Store,
        input: CreateBadge,
        now: DateTime<Utc>,
    ) -> ServiceResult<AchievementBadge> {
        input.validate()?;

        let badge = BadgeRepository::create(store, input, now).await;
        info!(badge_id = %badge.id, name = %badge.name, "Badge created");
        Ok(badge)
    }

    /// Insert the default badges when the catalog is empty
    ///
    /// Returns the number of badges inserted.
    pub async fn seed_default_achievements(store: &Store, now: DateTime<Utc>) -> usize {
        let badges = default_badges()
            .into_iter()
            .map(|template| AchievementBadge {
                id: Uuid::new_v4(),
                name: template.name.to_string(),
                description: template.description.to_string(),
                icon_url: None,
                category: template.category,
                requirement: template.requirement(),
                points_reward: template.points_reward,
                rarity: template.rarity,
                is_active: true,
                created_at: now,
            })
            .collect();

        let inserted = BadgeRepository::insert_if_empty(store, badges).await;
        if inserted > 0 {
            info!(count = inserted, "Default achievements seeded");
        }
        inserted
    }
}
