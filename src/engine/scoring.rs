//! Candidate ranking
//!
//! Candidates are ordered by ascending score difference. The sort is stable
//! and the generator emits candidates in lexicographic order of their lineup
//! player ids, so equally balanced candidates keep that order.

use crate::engine::outcome::MatchResult;

/// Sort candidates most balanced first
pub fn rank(candidates: &mut [MatchResult]) {
    candidates.sort_by_key(MatchResult::score_difference);
}

/// Whether candidates are in non-decreasing score difference order
pub fn is_ranked(candidates: &[MatchResult]) -> bool {
    candidates
        .windows(2)
        .all(|pair| pair[0].score_difference() <= pair[1].score_difference())
}

/// Group a ranked list into runs of equal score difference
pub fn balance_tiers(candidates: &[MatchResult]) -> impl Iterator<Item = &[MatchResult]> {
    candidates.chunk_by(|a, b| a.score_difference() == b.score_difference())
}
