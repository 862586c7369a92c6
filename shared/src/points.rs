//! Point award calculations
//!
//! Converts recorded fitness events (goal completion, workout completion,
//! streak milestones) into integer FitCoin awards.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No clock, storage or randomness; every input is a parameter
//! 2. **Total**: Inputs are coerced to safe defaults instead of rejected, and
//!    arithmetic saturates at the `i64` bounds instead of overflowing
//! 3. **Itemized**: Goal awards carry a breakdown whose parts sum to the total

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base points used when a goal carries no positive base value
pub const DEFAULT_BASE_POINTS: i64 = 100;

/// Bonus for finishing a goal strictly before its deadline
pub const TIME_BONUS_POINTS: i64 = 50;

/// Bonus per consecutive prior goal completion
pub const STREAK_BONUS_PER_GOAL: i64 = 10;

/// Bonus when a trainer signs off on the completion
pub const TRAINER_APPROVAL_BONUS: i64 = 25;

/// Points awarded for any completed workout
pub const WORKOUT_BASE_POINTS: i64 = 50;
/// Duration bonus per full 10 minutes
const WORKOUT_POINTS_PER_TEN_MINUTES: i64 = 5;
/// Cap on the duration bonus
pub const WORKOUT_DURATION_BONUS_CAP: i64 = 50;
const WORKOUT_POINTS_PER_EXERCISE: i64 = 5;
/// Cap on the exercise-count bonus
pub const WORKOUT_EXERCISE_BONUS_CAP: i64 = 30;
/// Bonus for following an assigned plan
pub const WORKOUT_PLANNED_BONUS: i64 = 20;

/// Flat award for a daily check-in, before any milestone bonus
pub const CHECKIN_BASE_POINTS: i64 = 10;

// ============================================================================
// Goal Difficulty
// ============================================================================

/// Goal difficulty as set by the trainer or athlete
///
/// Unrecognized labels deserialize as [`GoalDifficulty::Easy`], so a goal
/// with a malformed difficulty still scores at the neutral multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum GoalDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl GoalDifficulty {
    /// Get the point multiplier for this difficulty
    pub fn multiplier(&self) -> f64 {
        match self {
            GoalDifficulty::Easy => 1.0,
            GoalDifficulty::Medium => 1.5,
            GoalDifficulty::Hard => 2.0,
            GoalDifficulty::Expert => 3.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalDifficulty::Easy => "easy",
            GoalDifficulty::Medium => "medium",
            GoalDifficulty::Hard => "hard",
            GoalDifficulty::Expert => "expert",
        }
    }
}

impl From<&str> for GoalDifficulty {
    fn from(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "medium" => GoalDifficulty::Medium,
            "hard" => GoalDifficulty::Hard,
            "expert" => GoalDifficulty::Expert,
            _ => GoalDifficulty::Easy,
        }
    }
}

impl From<String> for GoalDifficulty {
    fn from(label: String) -> Self {
        GoalDifficulty::from(label.as_str())
    }
}

impl FromStr for GoalDifficulty {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GoalDifficulty::from(s))
    }
}

impl fmt::Display for GoalDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the difficulty multiplier for a raw label
///
/// Any label outside easy/medium/hard/expert yields 1.0.
pub fn difficulty_multiplier(label: &str) -> f64 {
    GoalDifficulty::from(label).multiplier()
}

// ============================================================================
// Goal Completion
// ============================================================================

/// Input for scoring a goal completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCalculationInput {
    #[serde(default)]
    pub goal_difficulty: GoalDifficulty,
    pub completion_time: DateTime<Utc>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Consecutive prior goal completions
    #[serde(default)]
    pub current_streak: i64,
    #[serde(default)]
    pub trainer_approval: bool,
    /// Missing, zero and negative values fall back to [`DEFAULT_BASE_POINTS`]
    #[serde(default)]
    pub base_points: Option<i64>,
}

/// Itemized point award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBreakdown {
    pub base_points: i64,
    pub difficulty_bonus: i64,
    pub time_bonus: i64,
    pub streak_bonus: i64,
    pub approval_bonus: i64,
}

impl PointBreakdown {
    /// Sum of all components, saturating at the `i64` bounds
    pub fn sum(&self) -> i64 {
        [
            self.difficulty_bonus,
            self.time_bonus,
            self.streak_bonus,
            self.approval_bonus,
        ]
        .into_iter()
        .fold(self.base_points, i64::saturating_add)
    }
}

/// Goal completion award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCalculationResult {
    pub total_points: i64,
    pub breakdown: PointBreakdown,
}

/// Substitute the default for absent or non-positive base points
pub fn normalize_base_points(base_points: Option<i64>) -> i64 {
    match base_points {
        Some(points) if points > 0 => points,
        _ => DEFAULT_BASE_POINTS,
    }
}

/// Round to the nearest integer, with .5 going towards positive infinity
///
/// Out-of-range values clamp to `i64::MIN`/`i64::MAX`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Calculate time bonus if goal was completed before its deadline
///
/// Completing exactly at the deadline earns nothing.
pub fn calculate_time_bonus(
    completion_time: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
) -> i64 {
    match deadline {
        Some(deadline) if completion_time < deadline => TIME_BONUS_POINTS,
        _ => 0,
    }
}

/// Calculate streak bonus from consecutive goal completions
///
/// Uncapped. A negative streak is a caller error and multiplies through.
pub fn calculate_streak_bonus(current_streak: i64) -> i64 {
    current_streak.saturating_mul(STREAK_BONUS_PER_GOAL)
}

/// Calculate trainer approval bonus
pub fn calculate_approval_bonus(trainer_approval: bool) -> i64 {
    if trainer_approval {
        TRAINER_APPROVAL_BONUS
    } else {
        0
    }
}

/// Calculate the difficulty bonus on top of the base points
pub fn calculate_difficulty_bonus(base_points: i64, difficulty: GoalDifficulty) -> i64 {
    round_half_up(base_points as f64 * (difficulty.multiplier() - 1.0))
}

/// Calculate total points for completing a goal
pub fn calculate_points(input: &PointCalculationInput) -> PointCalculationResult {
    let base_points = normalize_base_points(input.base_points);

    let breakdown = PointBreakdown {
        base_points,
        difficulty_bonus: calculate_difficulty_bonus(base_points, input.goal_difficulty),
        time_bonus: calculate_time_bonus(input.completion_time, input.deadline),
        streak_bonus: calculate_streak_bonus(input.current_streak),
        approval_bonus: calculate_approval_bonus(input.trainer_approval),
    };

    PointCalculationResult {
        total_points: breakdown.sum(),
        breakdown,
    }
}

// ============================================================================
// Workouts and Streaks
// ============================================================================

/// Calculate workout completion points
///
/// Formula: 50 + min(⌊minutes/10⌋ × 5, 50) + min(exercises × 5, 30) + (planned ? 20 : 0)
pub fn calculate_workout_points(
    duration_minutes: u32,
    exercise_count: u32,
    is_planned: bool,
) -> i64 {
    let duration_bonus = (i64::from(duration_minutes / 10) * WORKOUT_POINTS_PER_TEN_MINUTES)
        .min(WORKOUT_DURATION_BONUS_CAP);
    let exercise_bonus =
        (i64::from(exercise_count) * WORKOUT_POINTS_PER_EXERCISE).min(WORKOUT_EXERCISE_BONUS_CAP);
    let planned_bonus = if is_planned { WORKOUT_PLANNED_BONUS } else { 0 };

    WORKOUT_BASE_POINTS + duration_bonus + exercise_bonus + planned_bonus
}

/// Calculate streak milestone bonus
///
/// Only the highest tier reached applies.
pub fn calculate_streak_milestone_bonus(streak_days: u32) -> i64 {
    if streak_days >= 100 {
        500
    } else if streak_days >= 30 {
        200
    } else if streak_days >= 7 {
        50
    } else {
        0
    }
}

/// Points for a daily check-in that extends the streak to `new_streak`
pub fn calculate_checkin_points(new_streak: u32) -> i64 {
    CHECKIN_BASE_POINTS + calculate_streak_milestone_bonus(new_streak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    // =========================================================================
    // Difficulty Tests
    // =========================================================================

    #[rstest]
    #[case("easy", 1.0)]
    #[case("medium", 1.5)]
    #[case("hard", 2.0)]
    #[case("expert", 3.0)]
    #[case("legendary", 1.0)]
    #[case("", 1.0)]
    fn test_difficulty_multiplier(#[case] label: &str, #[case] expected: f64) {
        assert_eq!(difficulty_multiplier(label), expected);
    }

    #[test]
    fn test_unknown_difficulty_deserializes_as_easy() {
        let difficulty: GoalDifficulty = serde_json::from_str("\"impossible\"").unwrap();
        assert_eq!(difficulty, GoalDifficulty::Easy);

        let difficulty: GoalDifficulty = serde_json::from_str("\"expert\"").unwrap();
        assert_eq!(difficulty, GoalDifficulty::Expert);
        assert_eq!(serde_json::to_string(&difficulty).unwrap(), "\"expert\"");
    }

    // =========================================================================
    // Component Tests
    // =========================================================================

    #[test]
    fn test_time_bonus() {
        assert_eq!(calculate_time_bonus(at(0), None), 0);
        assert_eq!(calculate_time_bonus(at(0), Some(at(60))), 50);
        assert_eq!(calculate_time_bonus(at(60), Some(at(0))), 0);
        // Strictly before: equal timestamps earn nothing
        assert_eq!(calculate_time_bonus(at(30), Some(at(30))), 0);
    }

    #[test]
    fn test_streak_and_approval_bonus() {
        assert_eq!(calculate_streak_bonus(0), 0);
        assert_eq!(calculate_streak_bonus(5), 50);
        assert_eq!(calculate_streak_bonus(-2), -20);
        assert_eq!(calculate_streak_bonus(i64::MAX / 5), i64::MAX);
        assert_eq!(calculate_streak_bonus(i64::MIN), i64::MIN);
        assert_eq!(calculate_approval_bonus(true), 25);
        assert_eq!(calculate_approval_bonus(false), 0);
    }

    #[test]
    fn test_base_points_normalization() {
        assert_eq!(normalize_base_points(None), 100);
        assert_eq!(normalize_base_points(Some(0)), 100);
        assert_eq!(normalize_base_points(Some(-40)), 100);
        assert_eq!(normalize_base_points(Some(80)), 80);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
    }

    #[test]
    fn test_difficulty_bonus_rounding() {
        // 33 * 0.5 = 16.5 -> 17
        assert_eq!(calculate_difficulty_bonus(33, GoalDifficulty::Medium), 17);
        assert_eq!(calculate_difficulty_bonus(100, GoalDifficulty::Hard), 100);
        assert_eq!(calculate_difficulty_bonus(100, GoalDifficulty::Expert), 200);
        assert_eq!(calculate_difficulty_bonus(100, GoalDifficulty::Easy), 0);
    }

    // =========================================================================
    // Aggregate Tests
    // =========================================================================

    #[test]
    fn test_calculate_points_full_example() {
        let input = PointCalculationInput {
            goal_difficulty: GoalDifficulty::Hard,
            completion_time: at(0),
            deadline: Some(at(0) + Duration::days(2)),
            current_streak: 3,
            trainer_approval: true,
            base_points: Some(100),
        };

        let result = calculate_points(&input);

        assert_eq!(
            result.breakdown,
            PointBreakdown {
                base_points: 100,
                difficulty_bonus: 100,
                time_bonus: 50,
                streak_bonus: 30,
                approval_bonus: 25,
            }
        );
        assert_eq!(result.total_points, 305);
    }

    #[test]
    fn test_calculate_points_defaults() {
        let input = PointCalculationInput {
            goal_difficulty: GoalDifficulty::Easy,
            completion_time: at(0),
            deadline: None,
            current_streak: 0,
            trainer_approval: false,
            base_points: None,
        };

        let result = calculate_points(&input);
        assert_eq!(result.total_points, 100);
        assert_eq!(result.breakdown.difficulty_bonus, 0);
        assert_eq!(result.breakdown.time_bonus, 0);
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: PointCalculationInput = serde_json::from_str(
            r#"{"goal_difficulty": "medium", "completion_time": "2024-03-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(input.goal_difficulty, GoalDifficulty::Medium);
        assert_eq!(input.base_points, None);
        assert_eq!(calculate_points(&input).total_points, 150);
    }

    #[test]
    fn test_calculate_points_saturates() {
        let input = PointCalculationInput {
            goal_difficulty: GoalDifficulty::Expert,
            completion_time: at(0),
            deadline: Some(at(60)),
            current_streak: i64::MAX / 5,
            trainer_approval: true,
            base_points: Some(i64::MAX / 2),
        };

        let result = calculate_points(&input);
        assert_eq!(result.breakdown.difficulty_bonus, i64::MAX);
        assert_eq!(result.breakdown.streak_bonus, i64::MAX);
        assert_eq!(result.total_points, i64::MAX);
    }

    // =========================================================================
    // Workout and Milestone Tests
    // =========================================================================

    #[test]
    fn test_workout_points_example() {
        // 50 + 20 (45 min) + 30 (6 exercises) + 20 (planned)
        assert_eq!(calculate_workout_points(45, 6, true), 120);
        assert_eq!(calculate_workout_points(0, 0, false), 50);
        assert_eq!(calculate_workout_points(9, 1, false), 55);
    }

    #[test]
    fn test_workout_bonus_caps() {
        assert_eq!(calculate_workout_points(500, 0, false), 100);
        assert_eq!(calculate_workout_points(0, 40, false), 80);
        assert_eq!(calculate_workout_points(u32::MAX, u32::MAX, true), 150);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(6, 0)]
    #[case(7, 50)]
    #[case(29, 50)]
    #[case(30, 200)]
    #[case(99, 200)]
    #[case(100, 500)]
    #[case(1000, 500)]
    fn test_streak_milestone_bonus(#[case] days: u32, #[case] expected: i64) {
        assert_eq!(calculate_streak_milestone_bonus(days), expected);
    }

    #[test]
    fn test_checkin_points() {
        assert_eq!(calculate_checkin_points(1), 10);
        assert_eq!(calculate_checkin_points(7), 60);
        assert_eq!(calculate_checkin_points(30), 210);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: difficulty bonus is base × (multiplier - 1), rounded
        #[test]
        fn prop_difficulty_bonus_formula(base in 1i64..10_000, pick in 0usize..4) {
            let difficulty = [
                GoalDifficulty::Easy,
                GoalDifficulty::Medium,
                GoalDifficulty::Hard,
                GoalDifficulty::Expert,
            ][pick];
            let expected = (base as f64 * (difficulty.multiplier() - 1.0)).round() as i64;
            prop_assert_eq!(calculate_difficulty_bonus(base, difficulty), expected);
        }

        /// Property: streak bonus is linear in the streak
        #[test]
        fn prop_streak_bonus_linear(streak in 0i64..100_000) {
            prop_assert_eq!(calculate_streak_bonus(streak), streak * 10);
        }

        /// Property: time bonus is earned iff completion is strictly earlier
        #[test]
        fn prop_time_bonus_strict(completion in -100_000i64..100_000, deadline in -100_000i64..100_000) {
            let bonus = calculate_time_bonus(at(completion), Some(at(deadline)));
            prop_assert_eq!(bonus, if completion < deadline { 50 } else { 0 });
        }

        /// Property: breakdown always sums to the total
        #[test]
        fn prop_breakdown_sums_to_total(
            base in proptest::option::of(-500i64..5_000),
            streak in 0i64..500,
            approved in any::<bool>(),
            pick in 0usize..4,
            offset in -10_000i64..10_000
        ) {
            let difficulty = [
                GoalDifficulty::Easy,
                GoalDifficulty::Medium,
                GoalDifficulty::Hard,
                GoalDifficulty::Expert,
            ][pick];
            let input = PointCalculationInput {
                goal_difficulty: difficulty,
                completion_time: at(0),
                deadline: Some(at(offset)),
                current_streak: streak,
                trainer_approval: approved,
                base_points: base,
            };
            let result = calculate_points(&input);
            prop_assert_eq!(result.total_points, result.breakdown.sum());
            prop_assert!(result.breakdown.base_points > 0);
            // Pure: same input, same output
            prop_assert_eq!(result, calculate_points(&input));
        }

        /// Property: any i64 base or streak scores without panicking
        #[test]
        fn prop_calculate_points_total_over_full_range(
            base in proptest::option::of(any::<i64>()),
            streak in any::<i64>(),
            approved in any::<bool>(),
            pick in 0usize..4
        ) {
            let difficulty = [
                GoalDifficulty::Easy,
                GoalDifficulty::Medium,
                GoalDifficulty::Hard,
                GoalDifficulty::Expert,
            ][pick];
            let input = PointCalculationInput {
                goal_difficulty: difficulty,
                completion_time: at(0),
                deadline: Some(at(1)),
                current_streak: streak,
                trainer_approval: approved,
                base_points: base,
            };
            let result = calculate_points(&input);
            prop_assert_eq!(result.total_points, result.breakdown.sum());
            prop_assert!(result.breakdown.base_points > 0);
            prop_assert!(result.breakdown.difficulty_bonus >= 0);
        }

        /// Property: duration bonus never exceeds its cap
        #[test]
        fn prop_workout_points_bounded(minutes in 0u32..100_000, exercises in 0u32..1_000, planned in any::<bool>()) {
            let points = calculate_workout_points(minutes, exercises, planned);
            prop_assert!(points >= WORKOUT_BASE_POINTS);
            prop_assert!(points <= WORKOUT_BASE_POINTS + 50 + 30 + 20);
            let without_duration = calculate_workout_points(0, exercises, planned);
            prop_assert!(points - without_duration <= WORKOUT_DURATION_BONUS_CAP);
        }

        /// Property: milestone bonus never decreases as the streak grows
        #[test]
        fn prop_milestone_monotonic(days in 0u32..10_000) {
            prop_assert!(calculate_streak_milestone_bonus(days + 1) >= calculate_streak_milestone_bonus(days));
        }
    }
}
