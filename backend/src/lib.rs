//! FitCoach Gamification Backend Library
//!
//! Services, repositories and the in-process store behind the FitCoach
//! points, streaks, rewards and achievements features.

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;
pub mod state;
