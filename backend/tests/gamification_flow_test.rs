//! Integration tests for the activity replay flow

mod common;

use common::{day, TestApp};
use fitcoach_backend::events::EventOutcome;
use fitcoach_backend::repositories::{ProfileRepository, RewardRepository};
use fitcoach_backend::services::{AchievementService, GamificationService};
use fitcoach_shared::models::TransactionSource;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_week_of_workouts_earns_milestone_and_badges() {
    let app = TestApp::new().await;
    let athlete = app.register_athlete(None).await;

    let mut total = 0;
    for n in 0..7 {
        let applied = app
            .send(json!({
                "type": "workout_completed",
                "at": day(n),
                "user_id": athlete.id,
                "workout": {"duration_minutes": 45, "exercise_count": 6, "is_planned": true}
            }))
            .await
            .unwrap();

        match applied.outcome {
            EventOutcome::WorkoutAwarded(award) => {
                let expected = if n == 6 { 170 } else { 120 };
                assert_eq!(award.points, expected);
                total += award.points;
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
    assert_eq!(total, 890);

    let unlocked = AchievementService::unlocked_achievements(app.state.store(), athlete.id, day(7)).await;
    let names: Vec<_> = unlocked.iter().map(|b| b.name.as_str()).collect();
    assert!(names.contains(&"First Steps"));
    assert!(names.contains(&"Week Warrior"));

    let stats = GamificationService::get_stats(app.state.store(), athlete.id, day(7)).await;
    assert_eq!(stats.streaks.workout, 7);
    assert!(stats.total_points_earned >= 890 + 50 + 100);
    assert_eq!(stats.total_points_earned, stats.current_fit_coins);
}

#[tokio::test]
async fn test_goal_replayed_twice_is_rejected() {
    let app = TestApp::empty();
    let athlete = app.register_athlete(None).await;
    let event = json!({
        "type": "goal_completed",
        "at": day(0),
        "user_id": athlete.id,
        "trainer_approval": true,
        "goal": {"goal_id": "goal-42", "title": "Squat bodyweight", "difficulty": "expert", "deadline": day(3)}
    });

    let first = app.send(event.clone()).await.unwrap();
    match first.outcome {
        // 100 base + 200 expert + 50 early + 25 approval
        EventOutcome::GoalAwarded(award) => assert_eq!(award.points, 375),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let second = app.send(event).await.unwrap_err();
    assert_eq!(second.code(), "ALREADY_AWARDED");

    let profile = ProfileRepository::get(app.state.store(), athlete.id).await.unwrap();
    assert_eq!(profile.count_transactions(TransactionSource::GoalCompletion), 1);
    assert_eq!(profile.streaks.goals, 1);
}

#[tokio::test]
async fn test_goal_with_oversized_base_points_is_rejected() {
    let app = TestApp::empty();
    let athlete = app.register_athlete(None).await;

    let err = app
        .send(json!({
            "type": "goal_completed",
            "at": day(0),
            "user_id": athlete.id,
            "trainer_approval": true,
            "goal": {"goal_id": "goal-huge", "title": "Overflow", "difficulty": "expert", "base_points": i64::MAX / 2}
        }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");

    let stats = GamificationService::get_stats(app.state.store(), athlete.id, day(0)).await;
    assert_eq!(stats.total_points_earned, 0);
    assert_eq!(stats.streaks.goals, 0);
}

#[tokio::test]
async fn test_earn_then_redeem_reward() {
    let app = TestApp::empty();
    let athlete = app.register_athlete(None).await;

    let created = app
        .send(json!({
            "type": "create_reward",
            "reward": {
                "title": "Free smoothie",
                "description": "One smoothie at the gym bar",
                "category": "physical",
                "fit_coin_cost": 200,
                "tier": "bronze",
                "max_redemptions": 1,
                "created_by": "gym-staff"
            }
        }))
        .await
        .unwrap();
    let reward_id = match created.outcome {
        EventOutcome::RewardCreated { reward } => reward.id,
        other => panic!("unexpected outcome: {:?}", other),
    };

    let redeem = json!({"type": "redeem_reward", "user_id": athlete.id, "reward_id": reward_id});

    let broke = app.send(redeem.clone()).await.unwrap_err();
    assert_eq!(broke.code(), "INSUFFICIENT_FITCOINS");

    for n in 0..2 {
        app.send(json!({
            "type": "workout_completed",
            "at": day(n),
            "user_id": athlete.id,
            "workout": {"duration_minutes": 60, "exercise_count": 8}
        }))
        .await
        .unwrap();
    }

    let redeemed = app.send(redeem.clone()).await.unwrap();
    match redeemed.outcome {
        // two workouts at 110 each
        EventOutcome::RewardRedeemed(result) => assert_eq!(result.new_balance, 20),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let sold_out = app.send(redeem).await.unwrap_err();
    assert_eq!(sold_out.code(), "REWARD_SOLD_OUT");

    let reward = RewardRepository::get(app.state.store(), reward_id).await.unwrap();
    assert_eq!(reward.current_redemptions, 1);
}

#[tokio::test]
async fn test_streaks_reset_after_inactivity() {
    let app = TestApp::empty();
    let athlete = app.register_athlete(None).await;

    app.send(json!({"type": "check_in", "at": day(0), "user_id": athlete.id}))
        .await
        .unwrap();
    app.send(json!({"type": "check_in", "at": day(1), "user_id": athlete.id}))
        .await
        .unwrap();

    let applied = app
        .send(json!({"type": "reset_streaks", "at": day(4), "user_id": athlete.id}))
        .await
        .unwrap();
    match applied.outcome {
        EventOutcome::StreaksChecked(streaks) => assert_eq!(streaks.checkins, 0),
        other => panic!("unexpected outcome: {:?}", other),
    }

    let restart = app
        .send(json!({"type": "check_in", "at": day(5), "user_id": athlete.id}))
        .await
        .unwrap();
    match restart.outcome {
        EventOutcome::CheckedIn(result) => assert_eq!((result.points, result.streak), (10, 1)),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_trainer_leaderboard() {
    let app = TestApp::empty();
    let trainer = Uuid::new_v4();
    let coached = app.register_athlete(Some(trainer)).await;
    let other = app.register_athlete(None).await;

    for (athlete, minutes) in [(&coached, 20), (&other, 90)] {
        app.send(json!({
            "type": "workout_completed",
            "at": day(0),
            "user_id": athlete.id,
            "workout": {"duration_minutes": minutes, "exercise_count": 2}
        }))
        .await
        .unwrap();
    }

    let everyone = GamificationService::leaderboard(app.state.store(), 10, None).await.unwrap();
    assert_eq!(everyone[0].user_id, other.id);
    assert_eq!(everyone[0].user_name, other.name);

    let team = GamificationService::leaderboard(app.state.store(), 10, Some(trainer)).await.unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].user_id, coached.id);
    assert_eq!(team[0].rank, 1);
}

#[tokio::test]
async fn test_concurrent_awards_are_not_lost() {
    let app = Arc::new(TestApp::empty());
    let athlete = app.register_athlete(None).await;

    let tasks: Vec<_> = (0..20)
        .map(|n| {
            let app = Arc::clone(&app);
            let user_id = athlete.id;
            tokio::spawn(async move {
                app.send(json!({
                    "type": "goal_completed",
                    "user_id": user_id,
                    "goal": {"goal_id": format!("goal-{}", n), "title": "Parallel goal"}
                }))
                .await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let profile = ProfileRepository::get(app.state.store(), athlete.id).await.unwrap();
    assert_eq!(profile.streaks.goals, 20);
    // 100 base each plus 10 × (0 + 1 + … + 19) streak bonus
    assert_eq!(profile.total_points_earned, 20 * 100 + 10 * 190);
}
