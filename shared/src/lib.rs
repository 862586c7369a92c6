//! FitCoach Shared Library
//!
//! Point and level calculations, domain models and achievement rules shared
//! by the backend service and the WASM module.

pub mod achievements;
pub mod levels;
pub mod models;
pub mod points;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use levels::*;
pub use points::*;
pub use types::*;

pub use models::{
    AchievementBadge, AchievementRequirement, Athlete, GamificationProfile, PointTransaction,
    Reward, StreakCounters, StreakKind, TransactionSource, TransactionType,
};
