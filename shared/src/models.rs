//! Data models for the FitCoach gamification engine

use crate::levels::{calculate_level_from_xp, LevelState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Streaks and Transactions
// ============================================================================

/// Activity categories that keep a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakKind {
    Workout,
    Goals,
    Checkins,
}

/// Per-profile streak counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCounters {
    pub workout: u32,
    pub goals: u32,
    pub checkins: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_workout_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_goal_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checkin_date: Option<DateTime<Utc>>,
}

impl StreakCounters {
    pub fn get(&self, kind: StreakKind) -> u32 {
        match kind {
            StreakKind::Workout => self.workout,
            StreakKind::Goals => self.goals,
            StreakKind::Checkins => self.checkins,
        }
    }

    /// Longest of the three current streaks
    pub fn highest(&self) -> u32 {
        self.workout.max(self.goals).max(self.checkins)
    }

    /// Extend a streak by one and stamp its last activity
    pub fn increment(&mut self, kind: StreakKind, at: DateTime<Utc>) -> u32 {
        let (count, last) = match kind {
            StreakKind::Workout => (&mut self.workout, &mut self.last_workout_date),
            StreakKind::Goals => (&mut self.goals, &mut self.last_goal_date),
            StreakKind::Checkins => (&mut self.checkins, &mut self.last_checkin_date),
        };
        *count = count.saturating_add(1);
        *last = Some(at);
        *count
    }
}

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Earned,
    Spent,
    Bonus,
    Expired,
}

/// What produced a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    GoalCompletion,
    WorkoutCompletion,
    StreakBonus,
    Achievement,
    RewardRedemption,
    AdminAdjustment,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::GoalCompletion => "goal_completion",
            TransactionSource::WorkoutCompletion => "workout_completion",
            TransactionSource::StreakBonus => "streak_bonus",
            TransactionSource::Achievement => "achievement",
            TransactionSource::RewardRedemption => "reward_redemption",
            TransactionSource::AdminAdjustment => "admin_adjustment",
        }
    }
}

/// Point ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTransaction {
    /// Signed amount; spending is negative
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub source: TransactionSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Reward redemption record kept on the profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedeemedReward {
    pub reward_id: Uuid,
    pub redeemed_at: DateTime<Utc>,
    pub fit_coins_cost: i64,
}

// ============================================================================
// Gamification Profile
// ============================================================================

/// Cumulative gamification state of one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationProfile {
    pub user_id: Uuid,
    /// Lifetime points, never reduced by spending
    pub total_points_earned: i64,
    /// Spendable balance
    pub current_fit_coins: i64,
    pub experience_points: u64,
    #[serde(default)]
    pub streaks: StreakCounters,
    /// Unlocked badge ids
    #[serde(default)]
    pub achievements: Vec<Uuid>,
    #[serde(default)]
    pub redeemed_rewards: Vec<RedeemedReward>,
    #[serde(default)]
    pub point_transactions: Vec<PointTransaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GamificationProfile {
    /// Fresh profile with zero balances
    pub fn new(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            total_points_earned: 0,
            current_fit_coins: 0,
            experience_points: 0,
            streaks: StreakCounters::default(),
            achievements: Vec::new(),
            redeemed_rewards: Vec::new(),
            point_transactions: Vec::new(),
            rank: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Level derived from lifetime XP
    pub fn level_state(&self) -> LevelState {
        calculate_level_from_xp(self.experience_points)
    }

    /// Credit points to lifetime total, balance and XP, and log the transaction
    ///
    /// Totals saturate at the `i64` bounds.
    pub fn credit(&mut self, transaction: PointTransaction) {
        let amount = transaction.amount;
        self.total_points_earned = self.total_points_earned.saturating_add(amount);
        self.current_fit_coins = self.current_fit_coins.saturating_add(amount);
        self.experience_points = self.experience_points.saturating_add_signed(amount);
        self.updated_at = transaction.created_at;
        self.point_transactions.push(transaction);
    }

    /// Deduct from the spendable balance only, and log the transaction
    pub fn debit(&mut self, cost: i64, transaction: PointTransaction) {
        self.current_fit_coins = self.current_fit_coins.saturating_sub(cost);
        self.updated_at = transaction.created_at;
        self.point_transactions.push(transaction);
    }

    /// Number of ledger entries produced by a given source
    pub fn count_transactions(&self, source: TransactionSource) -> usize {
        self.point_transactions
            .iter()
            .filter(|t| t.source == source)
            .count()
    }

    /// Whether a ledger entry already exists for this source and id
    pub fn has_transaction_for(&self, source: TransactionSource, source_id: &str) -> bool {
        self.point_transactions
            .iter()
            .any(|t| t.source == source && t.source_id.as_deref() == Some(source_id))
    }

    pub fn has_achievement(&self, badge_id: Uuid) -> bool {
        self.achievements.contains(&badge_id)
    }
}

// ============================================================================
// Rewards
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardCategory {
    Digital,
    Physical,
    Experience,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RewardAvailability {
    #[default]
    Always,
    Limited,
    Seasonal,
}

/// Why a reward cannot be redeemed right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardBlock {
    Inactive,
    SoldOut,
    Expired,
}

/// Item in the FitCoin shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: RewardCategory,
    pub fit_coin_cost: i64,
    pub tier: RewardTier,
    #[serde(default)]
    pub availability: RewardAvailability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<u32>,
    #[serde(default)]
    pub current_redemptions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Reward {
    pub fn is_sold_out(&self) -> bool {
        self.max_redemptions
            .is_some_and(|max| self.current_redemptions >= max)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.is_some_and(|until| now > until)
    }

    /// First reason the reward cannot be redeemed, checked in shop order
    pub fn redemption_block(&self, now: DateTime<Utc>) -> Option<RewardBlock> {
        if !self.is_active {
            Some(RewardBlock::Inactive)
        } else if self.is_sold_out() {
            Some(RewardBlock::SoldOut)
        } else if self.is_expired(now) {
            Some(RewardBlock::Expired)
        } else {
            None
        }
    }
}

// ============================================================================
// Achievement Badges
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Consistency,
    Performance,
    Social,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AchievementRarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Profile statistic a badge requirement is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    Streak,
    GoalCount,
    WorkoutCount,
    PointsEarned,
    LevelReached,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    #[default]
    Gte,
    Lte,
    Eq,
}

impl Comparison {
    pub fn holds(&self, current: i64, target: i64) -> bool {
        match self {
            Comparison::Gte => current >= target,
            Comparison::Lte => current <= target,
            Comparison::Eq => current == target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRequirement {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    pub value: i64,
    #[serde(default)]
    pub comparison: Comparison,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field: Option<String>,
}

/// Unlockable badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementBadge {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub category: AchievementCategory,
    pub requirement: AchievementRequirement,
    pub points_reward: i64,
    #[serde(default)]
    pub rarity: AchievementRarity,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Athletes
// ============================================================================

/// Directory entry used for leaderboard names and trainer filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<Uuid>,
}
