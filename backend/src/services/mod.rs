//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the point calculator.

pub mod achievements;
pub mod gamification;

pub use achievements::AchievementService;
pub use gamification::GamificationService;
