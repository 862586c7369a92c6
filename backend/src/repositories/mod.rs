//! Store repositories
//!
//! Provides the data access layer over the in-process [`crate::db::Store`].

pub mod achievements;
pub mod athletes;
pub mod profiles;
pub mod rewards;

pub use achievements::BadgeRepository;
pub use athletes::AthleteRepository;
pub use profiles::ProfileRepository;
pub use rewards::RewardRepository;
