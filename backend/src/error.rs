//! Service error handling
//!
//! Errors raised by the gamification services. The point calculator itself
//! never fails; everything here comes from lookups, shop rules and input
//! validation at the service boundary.

use fitcoach_shared::validation::ValidationError;
use thiserror::Error;
use uuid::Uuid;

/// Gamification service error
#[derive(Error, Debug)]
pub enum GamificationError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Points already awarded for {source_name} {source_id}")]
    AlreadyAwarded {
        source_name: &'static str,
        source_id: String,
    },

    #[error("Reward {0} is not available")]
    RewardUnavailable(Uuid),

    #[error("Reward {0} is sold out")]
    RewardSoldOut(Uuid),

    #[error("Reward {0} has expired")]
    RewardExpired(Uuid),

    #[error("Insufficient FitCoins: balance {balance}, cost {cost}")]
    InsufficientFitCoins { balance: i64, cost: i64 },

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl GamificationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            GamificationError::Validation(_) => "VALIDATION_ERROR",
            GamificationError::NotFound(_) => "NOT_FOUND",
            GamificationError::AlreadyAwarded { .. } => "ALREADY_AWARDED",
            GamificationError::RewardUnavailable(_) => "REWARD_UNAVAILABLE",
            GamificationError::RewardSoldOut(_) => "REWARD_SOLD_OUT",
            GamificationError::RewardExpired(_) => "REWARD_EXPIRED",
            GamificationError::InsufficientFitCoins { .. } => "INSUFFICIENT_FITCOINS",
            GamificationError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationError> for GamificationError {
    fn from(err: ValidationError) -> Self {
        GamificationError::Validation(err.user_message())
    }
}

impl From<validator::ValidationErrors> for GamificationError {
    fn from(err: validator::ValidationErrors) -> Self {
        GamificationError::Validation(err.to_string())
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, GamificationError>;
