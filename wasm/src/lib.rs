//! FitCoach WASM Module
//!
//! Browser bindings for the point and level calculator, so the app can show
//! a points preview before an activity is submitted. Timestamps cross the
//! boundary as JavaScript epoch milliseconds; structured results are
//! returned as JSON strings.

use chrono::{DateTime, Utc};
use fitcoach_shared::levels;
use fitcoach_shared::points::{self, PointCalculationInput};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Level state plus the fraction of the current level completed
#[derive(Debug, Serialize)]
struct LevelView {
    level: u32,
    current_xp: u64,
    xp_for_next_level: u64,
    progress: f64,
}

fn from_millis(ms: f64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms as i64).unwrap_or_default()
}

/// Get the point multiplier for a difficulty label
#[wasm_bindgen]
pub fn difficulty_multiplier(difficulty: &str) -> f64 {
    points::difficulty_multiplier(difficulty)
}

/// Score a goal completion
///
/// Returns the `{total_points, breakdown}` result as JSON. A `base_points`
/// of zero or less falls back to the default.
#[wasm_bindgen]
pub fn calculate_goal_points(
    difficulty: &str,
    base_points: i32,
    completion_ms: f64,
    deadline_ms: Option<f64>,
    current_streak: i32,
    trainer_approval: bool,
) -> String {
    let input = PointCalculationInput {
        goal_difficulty: difficulty.into(),
        completion_time: from_millis(completion_ms),
        deadline: deadline_ms.map(from_millis),
        current_streak: i64::from(current_streak),
        trainer_approval,
        base_points: Some(i64::from(base_points)),
    };

    serde_json::to_string(&points::calculate_points(&input)).unwrap_or_default()
}

/// Score a workout completion, without streak milestones
#[wasm_bindgen]
pub fn calculate_workout_points(
    duration_minutes: u32,
    exercise_count: u32,
    is_planned: bool,
) -> i32 {
    points::calculate_workout_points(duration_minutes, exercise_count, is_planned) as i32
}

/// Bonus for reaching a streak length
#[wasm_bindgen]
pub fn calculate_streak_milestone_bonus(streak_days: u32) -> i32 {
    points::calculate_streak_milestone_bonus(streak_days) as i32
}

/// XP needed to clear a level
#[wasm_bindgen]
pub fn xp_for_level(level: u32) -> f64 {
    levels::calculate_xp_for_level(level) as f64
}

/// Resolve total XP into `{level, current_xp, xp_for_next_level, progress}` JSON
///
/// Negative or non-finite XP counts as zero.
#[wasm_bindgen]
pub fn calculate_level_from_xp(total_xp: f64) -> String {
    let total = if total_xp.is_finite() && total_xp > 0.0 {
        total_xp as u64
    } else {
        0
    };
    let state = levels::calculate_level_from_xp(total);

    serde_json::to_string(&LevelView {
        level: state.level,
        current_xp: state.current_xp,
        xp_for_next_level: state.xp_for_next_level,
        progress: state.progress(),
    })
    .unwrap_or_default()
}
