//! Request and response types for the gamification service

use crate::models::{
    AchievementBadge, AchievementCategory, AchievementRarity, AchievementRequirement,
    RewardAvailability, RewardCategory, RewardTier, StreakCounters,
};
use crate::points::{GoalDifficulty, PointBreakdown};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Activity Inputs
// ============================================================================

/// A goal the athlete just completed, as known by the goal store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedGoal {
    pub goal_id: String,
    pub title: String,
    #[serde(default)]
    pub difficulty: GoalDifficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_points: Option<i64>,
}

/// A logged workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    pub duration_minutes: u32,
    pub exercise_count: u32,
    #[serde(default)]
    pub is_planned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<String>,
}

// ============================================================================
// Award Results
// ============================================================================

/// Result of awarding a goal completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalAward {
    pub points: i64,
    pub breakdown: PointBreakdown,
    pub new_balance: i64,
    pub level_up: bool,
    pub level: u32,
}

/// Result of awarding a workout completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutAward {
    /// Workout points plus any milestone bonus
    pub points: i64,
    pub milestone_bonus: i64,
    pub new_balance: i64,
    pub streak: u32,
    pub level_up: bool,
}

/// Result of a daily check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinResult {
    /// Zero when the athlete already checked in today
    pub points: i64,
    pub streak: u32,
}

/// Result of a successful reward redemption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionResult {
    pub reward_id: Uuid,
    pub cost: i64,
    pub new_balance: i64,
}

// ============================================================================
// Read Models
// ============================================================================

/// Profile summary with derived level information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationStats {
    pub total_points_earned: i64,
    pub current_fit_coins: i64,
    pub level: u32,
    pub experience_points: u64,
    pub xp_for_next_level: u64,
    pub current_xp: u64,
    pub streaks: StreakCounters,
    pub achievement_count: usize,
    pub redeemed_rewards_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

/// Leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub user_name: String,
    pub total_points: i64,
    pub level: u32,
}

/// Newly unlocked badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlock {
    pub achievement_id: Uuid,
    pub name: String,
    pub description: String,
    pub points_awarded: i64,
    pub rarity: AchievementRarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Badge with the athlete's progress towards it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub achievement: AchievementBadge,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: i64,
    pub progress_max: i64,
}

// ============================================================================
// Admin Inputs
// ============================================================================

/// New shop reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateReward {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub category: RewardCategory,
    #[validate(range(min = 1))]
    pub fit_coin_cost: i64,
    pub tier: RewardTier,
    #[serde(default)]
    pub availability: RewardAvailability,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_redemptions: Option<u32>,
    #[validate(url)]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub created_by: String,
}

/// New achievement badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateBadge {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(url)]
    #[serde(default)]
    pub icon_url: Option<String>,
    pub category: AchievementCategory,
    pub requirement: AchievementRequirement,
    #[validate(range(min = 0))]
    pub points_reward: i64,
    #[serde(default)]
    pub rarity: AchievementRarity,
}
