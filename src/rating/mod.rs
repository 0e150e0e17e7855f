//! Rating system integration
//!
//! This module provides the team skill update seam, its TrueSkill and
//! Weng-Lin implementations from the skillratings crate, and the player
//! registry the engine mutates.

pub mod calculator;
pub mod registry;
pub mod trueskill;
pub mod weng_lin;

// Re-export commonly used types
pub use calculator::{MockRatingCalculator, RatingCalculator};
pub use registry::{PlayerRegistry, PlayerState};
pub use trueskill::{ExtendedTrueSkillConfig, TrueSkillRatingCalculator};
pub use weng_lin::{ExtendedWengLinConfig, WengLinRatingCalculator};
