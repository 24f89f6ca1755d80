//! Rift Matchmaker - balanced 5v5 team generation for community customs
//!
//! This crate splits ten players into two League of Legends teams, one
//! player per lane on each side, keeping every lane matchup inside a skill
//! tolerance and honoring preset lanes, avoid-role rules and player combos.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod roster;
pub mod sampling;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{MatchmakingError, Result};
pub use types::*;

// Re-export key components
pub use config::MatchmakingConfig;
pub use engine::{generate_matches, MatchResult, MatchmakingOutcome, MatchmakingResult};
pub use roster::Roster;
pub use sampling::{MatchSampler, SamplingStrategy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
