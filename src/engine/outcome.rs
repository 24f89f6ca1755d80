//! Candidate and result types produced by the generator

use crate::config::MatchmakingConfig;
use crate::engine::generator::{bit, PlayerMask};
use crate::engine::TEAM_SIZE;
use crate::sampling::MatchSampler;
use crate::types::{Player, Role, Side};
use serde::Serialize;
use std::collections::BTreeMap;

/// Roster indices per lane, `[blue, red]`, in [`Role::ALL`] order
pub(crate) type Lineup = [[u8; 2]; 5];

/// Sum of each team's lane ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct MatchScore {
    pub blue: u32,
    pub red: u32,
}

impl MatchScore {
    /// Balance quality; lower is better
    pub fn difference(&self) -> u32 {
        self.blue.abs_diff(self.red)
    }
}

/// One complete assignment of the ten players to lanes and sides
///
/// Players are referenced by their index in the roster passed to
/// [`generate_matches`](crate::engine::generate_matches).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchResult {
    lineup: Lineup,
    score: MatchScore,
}

impl MatchResult {
    pub(crate) fn new(lineup: Lineup, players: &[Player]) -> Self {
        let mut score = MatchScore::default();
        for role in Role::ALL {
            let [blue, red] = lineup[role.index()];
            score.blue += u32::from(players[blue as usize].rating(role));
            score.red += u32::from(players[red as usize].rating(role));
        }

        let candidate = Self { lineup, score };
        debug_assert_eq!(
            candidate.team_mask(Side::Blue) | candidate.team_mask(Side::Red),
            crate::engine::generator::ALL_PLAYERS,
            "player assigned twice in {:?}",
            lineup
        );
        candidate
    }

    /// `(blue, red)` roster indices for a lane
    pub fn pairing(&self, role: Role) -> (usize, usize) {
        let [blue, red] = self.lineup[role.index()];
        (blue as usize, red as usize)
    }

    pub fn player_at(&self, role: Role, side: Side) -> usize {
        let (blue, red) = self.pairing(role);
        match side {
            Side::Blue => blue,
            Side::Red => red,
        }
    }

    /// Roster indices in slot order: Top blue, Top red, Jungle blue, ...
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.lineup.iter().flatten().map(|index| *index as usize)
    }

    /// Roster indices of one team in lane order
    pub fn team(&self, side: Side) -> [usize; 5] {
        Role::ALL.map(|role| self.player_at(role, side))
    }

    /// Lane and side of a roster index
    pub fn assignment_of(&self, index: usize) -> Option<(Role, Side)> {
        Role::ALL.iter().find_map(|role| match self.pairing(*role) {
            (blue, _) if blue == index => Some((*role, Side::Blue)),
            (_, red) if red == index => Some((*role, Side::Red)),
            _ => None,
        })
    }

    pub fn side_of(&self, index: usize) -> Option<Side> {
        self.assignment_of(index).map(|(_, side)| side)
    }

    pub(crate) fn team_mask(&self, side: Side) -> PlayerMask {
        self.team(side)
            .iter()
            .fold(0, |mask, index| mask | bit(*index))
    }

    pub fn score(&self) -> MatchScore {
        self.score
    }

    pub fn score_difference(&self) -> u32 {
        self.score.difference()
    }

    pub(crate) fn resolve<'a>(&self, players: &'a [Player]) -> ResolvedMatch<'a> {
        let pairings = [Side::Blue, Side::Red]
            .into_iter()
            .flat_map(|side| self.team(side))
            .map(|index| &players[index])
            .collect();
        let team_ids = [Side::Blue, Side::Red]
            .into_iter()
            .flat_map(|side| [side.team_id(); TEAM_SIZE])
            .collect();

        let pairings_roles = Role::ALL
            .iter()
            .map(|role| {
                let (blue, red) = self.pairing(*role);
                (*role, [&players[blue], &players[red]])
            })
            .collect();

        ResolvedMatch {
            pairings,
            team_ids,
            pairings_roles,
            match_score: self.score,
        }
    }
}

/// A candidate with roster indices replaced by the players themselves
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMatch<'a> {
    /// Blue team in lane order, then red team in lane order
    pub pairings: Vec<&'a Player>,
    /// Team of each entry in `pairings` (100 blue, 200 red)
    pub team_ids: Vec<u16>,
    /// `[blue, red]` per lane
    pub pairings_roles: BTreeMap<Role, [&'a Player; 2]>,
    pub match_score: MatchScore,
}

/// Candidate counts at each stage of a generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    /// Structurally valid candidates before any filter
    pub raw_candidates: u64,
    pub tolerance_passed: usize,
    pub constraint_passed: usize,
}

/// Which list a displayed selection was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Candidates satisfying tolerance and every hard constraint
    Filtered,
    /// Constraints eliminated everything; showing tolerance-only candidates
    ToleranceOnly,
    /// Nothing satisfied the tolerance window
    Empty,
}

/// Candidates chosen for display
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub source: CandidateSource,
    pub matches: Vec<&'a MatchResult>,
}

/// Successful generation: ranked candidate lists plus diagnostics
#[derive(Debug, Clone)]
pub struct MatchmakingOutcome {
    pub(crate) players: Vec<Player>,
    pub(crate) all_matches: Vec<MatchResult>,
    pub(crate) filtered_matches: Vec<MatchResult>,
    pub(crate) stats: GenerationStats,
}

impl MatchmakingOutcome {
    /// The roster the candidates index into
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Every candidate within tolerance, most balanced first
    pub fn all_matches(&self) -> &[MatchResult] {
        &self.all_matches
    }

    /// Candidates that also satisfy every enabled hard constraint
    pub fn filtered_matches(&self) -> &[MatchResult] {
        &self.filtered_matches
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    pub fn candidate_source(&self) -> CandidateSource {
        if !self.filtered_matches.is_empty() {
            CandidateSource::Filtered
        } else if !self.all_matches.is_empty() {
            CandidateSource::ToleranceOnly
        } else {
            CandidateSource::Empty
        }
    }

    /// Candidates for display, at most `config.match_options` of them
    ///
    /// Falls back to tolerance-only candidates when constraints leave
    /// nothing; the returned source says which list was used.
    pub fn selection(&self, config: &MatchmakingConfig, sampler: &MatchSampler) -> Selection<'_> {
        let source = self.candidate_source();
        let pool = match source {
            CandidateSource::Filtered => &self.filtered_matches,
            CandidateSource::ToleranceOnly | CandidateSource::Empty => &self.all_matches,
        };

        Selection {
            source,
            matches: sampler.sample(pool, config.match_options),
        }
    }

    pub fn resolve(&self, candidate: &MatchResult) -> ResolvedMatch<'_> {
        candidate.resolve(&self.players)
    }
}
