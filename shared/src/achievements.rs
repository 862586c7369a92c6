//! Achievement requirement evaluation
//!
//! Measures a profile against a badge requirement. Storage of badges and
//! unlocks lives in the backend; everything here is pure.

use crate::models::{
    AchievementCategory, AchievementRarity, AchievementRequirement, Comparison,
    GamificationProfile, RequirementType, TransactionSource,
};

/// Current value of the statistic a requirement type measures
///
/// `custom` requirements have no built-in statistic and always read 0.
pub fn requirement_value(profile: &GamificationProfile, kind: RequirementType) -> i64 {
    match kind {
        RequirementType::Streak => i64::from(profile.streaks.highest()),
        RequirementType::GoalCount => {
            profile.count_transactions(TransactionSource::GoalCompletion) as i64
        }
        RequirementType::WorkoutCount => {
            profile.count_transactions(TransactionSource::WorkoutCompletion) as i64
        }
        RequirementType::PointsEarned => profile.total_points_earned,
        RequirementType::LevelReached => i64::from(profile.level_state().level),
        RequirementType::Custom => 0,
    }
}

/// Check if a profile meets a requirement
pub fn requirement_met(
    profile: &GamificationProfile,
    requirement: &AchievementRequirement,
) -> bool {
    let current = requirement_value(profile, requirement.kind);
    requirement.comparison.holds(current, requirement.value)
}

/// Progress towards a requirement as (progress, max), clamped to max
pub fn requirement_progress(
    profile: &GamificationProfile,
    requirement: &AchievementRequirement,
) -> (i64, i64) {
    let progress = requirement_value(profile, requirement.kind);
    (progress.min(requirement.value), requirement.value)
}

/// Catalog entry used to seed an empty badge store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub requirement_type: RequirementType,
    pub value: i64,
    pub points_reward: i64,
    pub rarity: AchievementRarity,
}

impl BadgeTemplate {
    pub fn requirement(&self) -> AchievementRequirement {
        AchievementRequirement {
            kind: self.requirement_type,
            value: self.value,
            comparison: Comparison::Gte,
            custom_field: None,
        }
    }
}

const fn template(
    name: &'static str,
    description: &'static str,
    category: AchievementCategory,
    requirement_type: RequirementType,
    value: i64,
    points_reward: i64,
    rarity: AchievementRarity,
) -> BadgeTemplate {
    BadgeTemplate {
        name,
        description,
        category,
        requirement_type,
        value,
        points_reward,
        rarity,
    }
}

/// Default badge catalog
#[rustfmt::skip]
pub fn default_badges() -> Vec<BadgeTemplate> {
    use AchievementCategory::*;
    use AchievementRarity::*;
    use RequirementType::*;

    vec![
        // Consistency
        template("First Steps", "Complete your first workout", Consistency, WorkoutCount, 1, 50, Common),
        template("Week Warrior", "Maintain a 7-day workout streak", Consistency, Streak, 7, 100, Rare),
        template("Month Master", "Maintain a 30-day workout streak", Consistency, Streak, 30, 500, Epic),
        template("Century Club", "Maintain a 100-day workout streak", Consistency, Streak, 100, 1000, Legendary),
        // Performance
        template("Goal Getter", "Complete your first goal", Performance, GoalCount, 1, 50, Common),
        template("Goal Crusher", "Complete 10 goals", Performance, GoalCount, 10, 200, Rare),
        template("Goal Machine", "Complete 50 goals", Performance, GoalCount, 50, 500, Epic),
        // Levels
        template("Rising Star", "Reach level 5", Milestone, LevelReached, 5, 100, Common),
        template("Fitness Pro", "Reach level 10", Milestone, LevelReached, 10, 250, Rare),
        template("Elite Athlete", "Reach level 25", Milestone, LevelReached, 25, 750, Epic),
        template("Legend", "Reach level 50", Milestone, LevelReached, 50, 2000, Legendary),
        // Points
        template("Point Collector", "Earn 1,000 total points", Milestone, PointsEarned, 1_000, 100, Common),
        template("Point Hoarder", "Earn 10,000 total points", Milestone, PointsEarned, 10_000, 500, Rare),
        template("Point Master", "Earn 100,000 total points", Milestone, PointsEarned, 100_000, 2500, Legendary),
    ]
}
