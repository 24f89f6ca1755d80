//! Error types for the team generator
//!
//! Application-level code (configuration, roster files, the CLI) uses anyhow
//! for propagation. The generation engine returns the typed
//! [`MatchmakingError`] directly so callers can match on the failure.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific matchmaking scenarios
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchmakingError {
    #[error("exactly {expected} players required, got {actual}")]
    InvalidPlayerCount { expected: usize, actual: usize },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
