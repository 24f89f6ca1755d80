//! Team generation engine
//!
//! [`generate_matches`] takes exactly ten players and a
//! [`MatchmakingConfig`] and returns every balanced 5v5 lane assignment:
//!
//! 1. enumerate lane assignments, honoring preset lanes structurally
//! 2. drop assignments where any lane gap exceeds the tolerance
//! 3. drop assignments that break avoid-role rules or player combos
//! 4. rank the survivors by team score difference
//!
//! The engine is pure and synchronous. Invalid input is reported as a typed
//! error; unsatisfiable settings yield empty candidate lists.

pub mod constraints;
pub mod generator;
pub mod outcome;
pub mod scoring;

pub use constraints::ConstraintSet;
pub use generator::{EnumerationCounts, LanePlan, SearchPlan};
pub use outcome::{
    CandidateSource, GenerationStats, MatchResult, MatchScore, MatchmakingOutcome, ResolvedMatch,
    Selection,
};

use crate::config::MatchmakingConfig;
use crate::error::MatchmakingError;
use crate::types::Player;
use tracing::{debug, info, warn};

/// Players on one team
pub const TEAM_SIZE: usize = 5;

/// Players required for one generation call
pub const PLAYERS_PER_MATCH: usize = 2 * TEAM_SIZE;

/// Outcome of a generation call
pub type MatchmakingResult = std::result::Result<MatchmakingOutcome, MatchmakingError>;

/// Generate every balanced team split for ten players
pub fn generate_matches(players: &[Player], config: &MatchmakingConfig) -> MatchmakingResult {
    if players.len() != PLAYERS_PER_MATCH {
        warn!(
            "Rejecting generation request with {} players",
            players.len()
        );
        return Err(MatchmakingError::InvalidPlayerCount {
            expected: PLAYERS_PER_MATCH,
            actual: players.len(),
        });
    }

    let mut all_matches = Vec::new();
    let counts = match SearchPlan::resolve(players, config) {
        Some(plan) => {
            debug!("Search space: {} candidates", plan.search_space());
            generator::enumerate(players, &plan, config.tolerance, |candidate| {
                all_matches.push(candidate)
            })
        }
        None => EnumerationCounts::default(),
    };

    scoring::rank(&mut all_matches);

    let constraints = ConstraintSet::compile(players, config);
    let filtered_matches: Vec<MatchResult> = if constraints.is_empty() {
        all_matches.clone()
    } else {
        all_matches
            .iter()
            .filter(|candidate| constraints.allows(candidate))
            .copied()
            .collect()
    };

    let stats = GenerationStats {
        raw_candidates: counts.raw,
        tolerance_passed: all_matches.len(),
        constraint_passed: filtered_matches.len(),
    };
    info!(
        "Generated matches: {} raw, {} within tolerance {}, {} after constraints",
        stats.raw_candidates, stats.tolerance_passed, config.tolerance, stats.constraint_passed
    );

    Ok(MatchmakingOutcome {
        players: players.to_vec(),
        all_matches,
        filtered_matches,
        stats,
    })
}
