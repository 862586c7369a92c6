//! Input validation functions
//!
//! The calculator itself never rejects input; these checks run at the
//! service boundary before an event is scored. Admin inputs additionally
//! derive `validator::Validate` (see [`crate::types`]).

use thiserror::Error;

/// Longest workout accepted, in minutes (24 hours)
pub const MAX_WORKOUT_MINUTES: u32 = 1440;

/// Most exercises accepted in a single workout
pub const MAX_EXERCISES_PER_WORKOUT: u32 = 200;

/// Largest base value a goal may carry
pub const MAX_GOAL_BASE_POINTS: i64 = 10_000;

/// Largest leaderboard page
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Validate workout duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> Result<(), String> {
    if minutes > MAX_WORKOUT_MINUTES {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate exercise count for a workout
pub fn validate_exercise_count(count: u32) -> Result<(), String> {
    if count > MAX_EXERCISES_PER_WORKOUT {
        return Err(format!(
            "Exercise count cannot exceed {}",
            MAX_EXERCISES_PER_WORKOUT
        ));
    }
    Ok(())
}

/// Validate the base points of a goal
///
/// Missing and non-positive values are accepted; scoring falls back to the
/// default for them.
pub fn validate_base_points(base_points: Option<i64>) -> Result<(), String> {
    match base_points {
        Some(points) if points > MAX_GOAL_BASE_POINTS => Err(format!(
            "Base points cannot exceed {}",
            MAX_GOAL_BASE_POINTS
        )),
        _ => Ok(()),
    }
}

/// Validate a leaderboard or history limit
pub fn validate_limit(limit: usize, max: usize) -> Result<(), String> {
    if limit == 0 {
        return Err("Limit must be at least 1".to_string());
    }
    if limit > max {
        return Err(format!("Limit cannot exceed {}", max));
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "duration_minutes" => "Workout Duration",
        "exercise_count" => "Exercise Count",
        "base_points" => "Base Points",
        "fit_coin_cost" => "FitCoin Cost",
        "points_reward" => "Points Reward",
        "limit" => "Limit",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{display_label}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Validate the inputs of a workout completion
pub fn validate_workout(duration_minutes: u32, exercise_count: u32) -> Result<(), ValidationError> {
    validate_duration_minutes(duration_minutes)
        .map_err(|msg| ValidationError::new("duration_minutes", &msg))?;
    validate_exercise_count(exercise_count)
        .map_err(|msg| ValidationError::new("exercise_count", &msg))?;
    Ok(())
}

/// Validate the inputs of a goal completion
pub fn validate_goal(base_points: Option<i64>) -> Result<(), ValidationError> {
    validate_base_points(base_points).map_err(|msg| ValidationError::new("base_points", &msg))
}
