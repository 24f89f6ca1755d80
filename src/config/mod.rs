//! Configuration management for the team generator
//!
//! This module holds the per-call matchmaking parameters consumed by the
//! engine and the application configuration used by the CLI.

pub mod app;
pub mod matchmaking;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, OutputFormat, OutputSettings, ServiceSettings};
pub use matchmaking::{
    AvoidRoleRule, AvoidRoles, LanePin, MatchmakingConfig, PlayerCombos, PresetLanes,
};
