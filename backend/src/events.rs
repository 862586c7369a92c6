//! Activity event replay
//!
//! One JSON object per line. Each line names an activity, optionally carries
//! its own timestamp, and is dispatched to the matching service call.
//!
//! ```json
//! {"type": "workout_completed", "user_id": "…", "workout": {"duration_minutes": 45, "exercise_count": 6}}
//! ```

use crate::error::{GamificationError, ServiceResult};
use crate::repositories::AthleteRepository;
use crate::services::{AchievementService, GamificationService};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use fitcoach_shared::models::{Athlete, Reward, StreakCounters};
use fitcoach_shared::types::{
    AchievementUnlock, CheckinResult, CompletedGoal, CompletedWorkout, CreateReward, GoalAward,
    RedemptionResult, WorkoutAward,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// A single activity
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    RegisterAthlete {
        athlete: Athlete,
    },
    CreateReward {
        reward: CreateReward,
    },
    GoalCompleted {
        user_id: Uuid,
        goal: CompletedGoal,
        #[serde(default)]
        trainer_approval: bool,
    },
    WorkoutCompleted {
        user_id: Uuid,
        workout: CompletedWorkout,
    },
    CheckIn {
        user_id: Uuid,
    },
    ResetStreaks {
        user_id: Uuid,
    },
    RedeemReward {
        user_id: Uuid,
        reward_id: Uuid,
    },
}

/// A line of the event log
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventLine {
    /// When the activity happened; replay time if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub event: ActivityEvent,
}

/// What applying an event produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    AthleteRegistered { user_id: Uuid },
    RewardCreated { reward: Reward },
    GoalAwarded(GoalAward),
    WorkoutAwarded(WorkoutAward),
    CheckedIn(CheckinResult),
    StreaksChecked(StreakCounters),
    RewardRedeemed(RedemptionResult),
}

/// Result of one applied event, with any badges it unlocked
#[derive(Debug, Clone, Serialize)]
pub struct AppliedEvent {
    #[serde(flatten)]
    pub outcome: EventOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unlocks: Vec<AchievementUnlock>,
}

/// Parse one line of the event log
pub fn parse_line(line: &str) -> ServiceResult<EventLine> {
    serde_json::from_str(line)
        .map_err(|e| GamificationError::Validation(format!("Malformed event: {}", e)))
}

/// Apply one event to the store
///
/// Point-earning events are followed by an achievement check.
pub async fn apply(
    state: &AppState,
    line: EventLine,
    now: DateTime<Utc>,
) -> ServiceResult<AppliedEvent> {
    let at = line.at.unwrap_or(now);
    let store = state.store();

    let (outcome, user_id) = match line.event {
        ActivityEvent::RegisterAthlete { athlete } => {
            let user_id = athlete.id;
            AthleteRepository::upsert(store, athlete).await;
            (EventOutcome::AthleteRegistered { user_id }, None)
        }
        ActivityEvent::CreateReward { reward } => {
            let reward = GamificationService::create_reward(store, reward, at).await?;
            (EventOutcome::RewardCreated { reward }, None)
        }
        ActivityEvent::GoalCompleted {
            user_id,
            goal,
            trainer_approval,
        } => {
            let award = GamificationService::award_goal_completion(
                store,
                user_id,
                &goal,
                trainer_approval,
                at,
            )
            .await?;
            (EventOutcome::GoalAwarded(award), Some(user_id))
        }
        ActivityEvent::WorkoutCompleted { user_id, workout } => {
            let award =
                GamificationService::award_workout_completion(store, user_id, &workout, at).await?;
            (EventOutcome::WorkoutAwarded(award), Some(user_id))
        }
        ActivityEvent::CheckIn { user_id } => {
            let result = GamificationService::record_checkin(store, user_id, at).await;
            (EventOutcome::CheckedIn(result), Some(user_id))
        }
        ActivityEvent::ResetStreaks { user_id } => {
            let window = state.config().gamification.streak_reset_window();
            let streaks =
                GamificationService::check_and_reset_streaks(store, user_id, window, at).await;
            (EventOutcome::StreaksChecked(streaks), None)
        }
        ActivityEvent::RedeemReward { user_id, reward_id } => {
            let result = GamificationService::redeem_reward(store, user_id, reward_id, at).await?;
            (EventOutcome::RewardRedeemed(result), None)
        }
    };

    let unlocks = match user_id {
        Some(user_id) => AchievementService::check_and_award(store, user_id, at).await,
        None => Vec::new(),
    };

    debug!(?outcome, unlocked = unlocks.len(), "Event applied");
    Ok(AppliedEvent { outcome, unlocks })
}
