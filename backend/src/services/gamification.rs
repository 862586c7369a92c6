//! Gamification service for points, streaks, rewards and rankings
//!
//! Provides business logic for:
//! - Goal, workout and daily check-in point awards
//! - Streak upkeep
//! - FitCoin reward redemption
//! - Leaderboards and point history
//!
//! Every write is a single locked read-modify-write of one profile through
//! [`ProfileRepository::update`]. Callers pass the current time explicitly.

use crate::db::Store;
use crate::error::{GamificationError, ServiceResult};
use crate::repositories::{AthleteRepository, ProfileRepository, RewardRepository};
use chrono::{DateTime, Duration, Utc};
use fitcoach_shared::models::{
    GamificationProfile, PointTransaction, RedeemedReward, Reward, RewardBlock, StreakCounters,
    StreakKind, TransactionSource, TransactionType,
};
use fitcoach_shared::points::{
    calculate_checkin_points, calculate_points, calculate_streak_milestone_bonus,
    calculate_workout_points, PointCalculationInput,
};
use fitcoach_shared::types::{
    CheckinResult, CompletedGoal, CompletedWorkout, CreateReward, GamificationStats, GoalAward,
    LeaderboardEntry, RedemptionResult, WorkoutAward,
};
use fitcoach_shared::validation::{
    validate_goal, validate_limit, validate_workout, MAX_LEADERBOARD_LIMIT,
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Display name used when the athlete directory has no entry
const UNKNOWN_ATHLETE: &str = "Unknown";

/// Count points handed out, labelled by what produced them
fn record_points_metric(source: TransactionSource, points: i64) {
    if points > 0 {
        metrics::counter!("fitcoach_points_awarded_total", "source" => source.as_str())
            .increment(points as u64);
    }
}

/// Gamification service for business logic
pub struct GamificationService;

impl GamificationService {
    /// Get a profile, creating an empty one on first access
    pub async fn get_or_create_profile(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> GamificationProfile {
        ProfileRepository::get_or_create(store, user_id, now).await
    }

    /// Profile summary with derived level information
    pub async fn get_stats(store: &Store, user_id: Uuid, now: DateTime<Utc>) -> GamificationStats {
        let profile = ProfileRepository::get_or_create(store, user_id, now).await;
        let level = profile.level_state();

        GamificationStats {
            total_points_earned: profile.total_points_earned,
            current_fit_coins: profile.current_fit_coins,
            level: level.level,
            experience_points: profile.experience_points,
            xp_for_next_level: level.xp_for_next_level,
            current_xp: level.current_xp,
            streaks: profile.streaks,
            achievement_count: profile.achievements.len(),
            redeemed_rewards_count: profile.redeemed_rewards.len(),
            rank: profile.rank,
        }
    }

    // ========================================================================
    // Point Awards
    // ========================================================================

    /// Award points for a completed goal
    ///
    /// The goal streak before this completion feeds the streak bonus. A goal
    /// is awarded at most once.
    pub async fn award_goal_completion(
        store: &Store,
        user_id: Uuid,
        goal: &CompletedGoal,
        trainer_approval: bool,
        now: DateTime<Utc>,
    ) -> ServiceResult<GoalAward> {
        validate_goal(goal.base_points)?;

        let award = ProfileRepository::update(store, user_id, now, |profile| {
            if profile.has_transaction_for(TransactionSource::GoalCompletion, &goal.goal_id) {
                return Err(GamificationError::AlreadyAwarded {
                    source_name: TransactionSource::GoalCompletion.as_str(),
                    source_id: goal.goal_id.clone(),
                });
            }

            let result = calculate_points(&PointCalculationInput {
                goal_difficulty: goal.difficulty,
                completion_time: now,
                deadline: goal.deadline,
                current_streak: i64::from(profile.streaks.goals),
                trainer_approval,
                base_points: goal.base_points,
            });
            let previous_level = profile.level_state().level;

            profile.streaks.increment(StreakKind::Goals, now);
            profile.credit(PointTransaction {
                amount: result.total_points,
                kind: TransactionType::Earned,
                source: TransactionSource::GoalCompletion,
                source_id: Some(goal.goal_id.clone()),
                description: format!("Completed goal: {}", goal.title),
                created_at: now,
            });

            let level = profile.level_state().level;
            Ok(GoalAward {
                points: result.total_points,
                breakdown: result.breakdown,
                new_balance: profile.current_fit_coins,
                level_up: level > previous_level,
                level,
            })
        })
        .await?;

        record_points_metric(TransactionSource::GoalCompletion, award.points);
        info!(
            user_id = %user_id,
            goal_id = %goal.goal_id,
            points = award.points,
            level_up = award.level_up,
            "Goal completion awarded"
        );

        Ok(award)
    }

    /// Award points for a completed workout
    ///
    /// Adds the milestone bonus for the streak this workout extends to.
    pub async fn award_workout_completion(
        store: &Store,
        user_id: Uuid,
        workout: &CompletedWorkout,
        now: DateTime<Utc>,
    ) -> ServiceResult<WorkoutAward> {
        validate_workout(workout.duration_minutes, workout.exercise_count)?;

        let award = ProfileRepository::update_with(store, user_id, now, |profile| {
            let base = calculate_workout_points(
                workout.duration_minutes,
                workout.exercise_count,
                workout.is_planned,
            );
            let milestone_bonus =
                calculate_streak_milestone_bonus(profile.streaks.workout.saturating_add(1));
            let points = base + milestone_bonus;
            let previous_level = profile.level_state().level;

            let streak = profile.streaks.increment(StreakKind::Workout, now);
            profile.credit(PointTransaction {
                amount: points,
                kind: TransactionType::Earned,
                source: TransactionSource::WorkoutCompletion,
                source_id: workout.workout_id.clone(),
                description: format!(
                    "Completed workout ({} min, {} exercises)",
                    workout.duration_minutes, workout.exercise_count
                ),
                created_at: now,
            });

            WorkoutAward {
                points,
                milestone_bonus,
                new_balance: profile.current_fit_coins,
                streak,
                level_up: profile.level_state().level > previous_level,
            }
        })
        .await;

        record_points_metric(TransactionSource::WorkoutCompletion, award.points);
        info!(
            user_id = %user_id,
            points = award.points,
            streak = award.streak,
            "Workout completion awarded"
        );

        Ok(award)
    }

    /// Record a daily check-in
    ///
    /// A second check-in on the same UTC calendar day earns nothing and
    /// leaves the streak as is.
    pub async fn record_checkin(
        store: &Store,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> CheckinResult {
        let result = ProfileRepository::update_with(store, user_id, now, |profile| {
            let already_today = profile
                .streaks
                .last_checkin_date
                .is_some_and(|last| last.date_naive() == now.date_naive());
            if already_today {
                return CheckinResult {
                    points: 0,
                    streak: profile.streaks.checkins,
                };
            }

            let points = calculate_checkin_points(profile.streaks.checkins.saturating_add(1));
            let streak = profile.streaks.increment(StreakKind::Checkins, now);
            profile.credit(PointTransaction {
                amount: points,
                kind: TransactionType::Earned,
                source: TransactionSource::StreakBonus,
                source_id: None,
                description: format!("Daily check-in ({} day streak)", streak),
                created_at: now,
            });

            CheckinResult { points, streak }
        })
        .await;

        if result.points > 0 {
            record_points_metric(TransactionSource::StreakBonus, result.points);
            info!(user_id = %user_id, streak = result.streak, "Daily check-in recorded");
        } else {
            debug!(user_id = %user_id, "Check-in already recorded today");
        }

        result
    }

    /// Zero workout and check-in streaks whose last activity is older than `window`
    ///
    /// The goal streak is never reset here.
    pub async fn check_and_reset_streaks(
        store: &Store,
        user_id: Uuid,
        window: Duration,
        now: DateTime<Utc>,
    ) -> StreakCounters {
        let cutoff = now - window;
        let streaks = ProfileRepository::update_with(store, user_id, now, |profile| {
            let streaks = &mut profile.streaks;
            if streaks.last_workout_date.is_some_and(|last| last < cutoff) {
                streaks.workout = 0;
            }
            if streaks.last_checkin_date.is_some_and(|last| last < cutoff) {
                streaks.checkins = 0;
            }
            streaks.clone()
        })
        .await;

        debug!(
            user_id = %user_id,
            workout = streaks.workout,
            checkins = streaks.checkins,
            "Streaks checked"
        );
        streaks
    }

    // ========================================================================
    // Rewards
    // ========================================================================

    /// Add a reward to the shop
    pub async fn create_reward(
        store: &Store,
        input: CreateReward,
        now: DateTime<Utc>,
    ) -> ServiceResult<Reward> {
        input.validate()?;

        let reward = RewardRepository::create(store, input, now).await;
        info!(reward_id = %reward.id, cost = reward.fit_coin_cost, "Reward created");
        Ok(reward)
    }

    /// Redeem a reward with FitCoins
    ///
    /// Reward checks come first (not found, inactive, sold out, expired),
    /// then the balance. The redemption slot is claimed before the debit and
    /// given back if the debit is refused.
    pub async fn redeem_reward(
        store: &Store,
        user_id: Uuid,
        reward_id: Uuid,
        now: DateTime<Utc>,
    ) -> ServiceResult<RedemptionResult> {
        let reward = match RewardRepository::reserve(store, reward_id, now).await {
            None => {
                return Err(GamificationError::NotFound(format!(
                    "Reward {} not found",
                    reward_id
                )))
            }
            Some(Err(RewardBlock::Inactive)) => {
                return Err(GamificationError::RewardUnavailable(reward_id))
            }
            Some(Err(RewardBlock::SoldOut)) => {
                return Err(GamificationError::RewardSoldOut(reward_id))
            }
            Some(Err(RewardBlock::Expired)) => {
                return Err(GamificationError::RewardExpired(reward_id))
            }
            Some(Ok(reward)) => reward,
        };

        let cost = reward.fit_coin_cost;
        let debit = ProfileRepository::update(store, user_id, now, |profile| {
            if profile.current_fit_coins < cost {
                return Err(GamificationError::InsufficientFitCoins {
                    balance: profile.current_fit_coins,
                    cost,
                });
            }

            profile.redeemed_rewards.push(RedeemedReward {
                reward_id,
                redeemed_at: now,
                fit_coins_cost: cost,
            });
            profile.debit(
                cost,
                PointTransaction {
                    amount: -cost,
                    kind: TransactionType::Spent,
                    source: TransactionSource::RewardRedemption,
                    source_id: Some(reward_id.to_string()),
                    description: format!("Redeemed reward: {}", reward.title),
                    created_at: now,
                },
            );

            Ok(profile.current_fit_coins)
        })
        .await;

        match debit {
            Ok(new_balance) => {
                info!(
                    user_id = %user_id,
                    reward_id = %reward_id,
                    cost,
                    new_balance,
                    "Reward redeemed"
                );
                Ok(RedemptionResult {
                    reward_id,
                    cost,
                    new_balance,
                })
            }
            Err(err) => {
                RewardRepository::release(store, reward_id).await;
                warn!(
                    user_id = %user_id,
                    reward_id = %reward_id,
                    error = %err,
                    "Redemption refused"
                );
                Err(err)
            }
        }
    }

    /// Rewards that can be redeemed right now, cheapest first
    pub async fn available_rewards(store: &Store, now: DateTime<Utc>) -> Vec<Reward> {
        RewardRepository::list(store)
            .await
            .into_iter()
            .filter(|reward| reward.redemption_block(now).is_none())
            .collect()
    }

    // ========================================================================
    // Rankings and History
    // ========================================================================

    /// Leaderboard by lifetime points, optionally limited to one trainer's athletes
    pub async fn leaderboard(
        store: &Store,
        limit: usize,
        trainer_id: Option<Uuid>,
    ) -> ServiceResult<Vec<LeaderboardEntry>> {
        validate_limit(limit, MAX_LEADERBOARD_LIMIT).map_err(GamificationError::Validation)?;

        let coached = match trainer_id {
            Some(trainer_id) => Some(AthleteRepository::ids_for_trainer(store, trainer_id).await),
            None => None,
        };

        let profiles = ProfileRepository::list_ranked(store).await;
        let mut entries = Vec::with_capacity(limit.min(profiles.len()));

        for profile in profiles
            .into_iter()
            .filter(|p| coached.as_ref().map_or(true, |ids| ids.contains(&p.user_id)))
            .take(limit)
        {
            let user_name = AthleteRepository::get(store, profile.user_id)
                .await
                .map(|a| a.name)
                .unwrap_or_else(|| UNKNOWN_ATHLETE.to_string());

            entries.push(LeaderboardEntry {
                rank: entries.len() as u32 + 1,
                user_id: profile.user_id,
                user_name,
                total_points: profile.total_points_earned,
                level: profile.level_state().level,
            });
        }

        Ok(entries)
    }

    /// Assign 1-based ranks to every profile in leaderboard order
    pub async fn update_ranks(store: &Store) -> usize {
        let ranking: Vec<(Uuid, u32)> = ProfileRepository::list_ranked(store)
            .await
            .iter()
            .enumerate()
            .map(|(i, p)| (p.user_id, i as u32 + 1))
            .collect();

        let updated = ProfileRepository::assign_ranks(store, &ranking).await;
        info!(profiles = updated, "Ranks updated");
        updated
    }

    /// Most recent point transactions, newest first
    pub async fn point_history(
        store: &Store,
        user_id: Uuid,
        limit: usize,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<PointTransaction>> {
        validate_limit(limit, usize::MAX).map_err(GamificationError::Validation)?;

        let profile = ProfileRepository::get_or_create(store, user_id, now).await;
        let mut history = profile.point_transactions;
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history.truncate(limit);

        Ok(history)
    }
}
