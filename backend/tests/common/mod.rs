//! Common test utilities for integration tests
//!
//! Builds an in-process engine and feeds it activity events as JSON, the
//! same way the replay binary does.

#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use fitcoach_backend::{
    config::AppConfig,
    db::Store,
    error::ServiceResult,
    events::{self, AppliedEvent},
    services::AchievementService,
    state::AppState,
};
use fitcoach_shared::models::Athlete;
use serde_json::Value;
use uuid::Uuid;

/// Test application wrapper
pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    /// Create an engine with the default badge catalog
    pub async fn new() -> Self {
        let app = Self::empty();
        AchievementService::seed_default_achievements(app.state.store(), base_time()).await;
        app
    }

    /// Create an engine with no badges
    pub fn empty() -> Self {
        Self {
            state: AppState::new(Store::new(), AppConfig::default()),
        }
    }

    /// Apply one event given as JSON
    pub async fn send(&self, event: Value) -> ServiceResult<AppliedEvent> {
        let line = events::parse_line(&event.to_string())?;
        events::apply(&self.state, line, base_time()).await
    }

    /// Register an athlete with a generated name
    pub async fn register_athlete(&self, trainer_id: Option<Uuid>) -> Athlete {
        let athlete = Athlete {
            id: Uuid::new_v4(),
            name: Name().fake(),
            trainer_id,
        };
        self.send(serde_json::json!({
            "type": "register_athlete",
            "athlete": athlete,
        }))
        .await
        .expect("register athlete");
        athlete
    }
}

/// Fixed start of every test timeline
pub fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_709_280_000, 0).expect("valid timestamp")
}

/// `base_time` shifted by whole days
pub fn day(n: i64) -> DateTime<Utc> {
    base_time() + Duration::days(n)
}
