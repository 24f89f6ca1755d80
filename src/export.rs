//! Rendering generated matches for sharing
//!
//! Text blocks are meant to be pasted into a chat channel; the JSON response
//! mirrors what the dashboard consumes.

use crate::engine::{
    CandidateSource, GenerationStats, MatchmakingOutcome, ResolvedMatch, Selection,
};
use crate::error::{MatchmakingError, Result};
use crate::types::{Player, Role};
use serde::Serialize;

fn display_name(player: &Player) -> String {
    if player.wildcard {
        format!("{} (wildcard)", player.name)
    } else {
        player.name.clone()
    }
}

/// One candidate as a text block
pub fn format_match_block(number: usize, resolved: &ResolvedMatch<'_>) -> String {
    let score = resolved.match_score;
    let mut block = format!(
        "Match #{} - Blue {} vs Red {} (diff {})\n",
        number,
        score.blue,
        score.red,
        score.difference()
    );

    let width = Role::ALL
        .iter()
        .map(|role| role.to_string().len())
        .max()
        .unwrap_or(0)
        + 1;
    for role in Role::ALL {
        if let Some([blue, red]) = resolved.pairings_roles.get(&role) {
            let label = format!("{}:", role);
            block.push_str(&format!(
                "  {:<width$} {} vs {}\n",
                label,
                display_name(blue),
                display_name(red),
                width = width
            ));
        }
    }
    block
}

/// Header line describing where the displayed matches came from
pub fn selection_header(outcome: &MatchmakingOutcome, selection: &Selection<'_>) -> String {
    match selection.source {
        CandidateSource::Filtered => format!(
            "Showing {} of {} matches satisfying all constraints",
            selection.matches.len(),
            outcome.filtered_matches().len()
        ),
        CandidateSource::ToleranceOnly => format!(
            "No match satisfies every constraint; showing {} of {} tolerance-only matches",
            selection.matches.len(),
            outcome.all_matches().len()
        ),
        CandidateSource::Empty => {
            "No match found within the tolerance window; try relaxing the tolerance".to_string()
        }
    }
}

/// Header plus one block per displayed match, ready for the clipboard
pub fn format_selection(outcome: &MatchmakingOutcome, selection: &Selection<'_>) -> String {
    let mut text = selection_header(outcome, selection);
    text.push('\n');
    for (i, candidate) in selection.matches.iter().enumerate() {
        text.push('\n');
        text.push_str(&format_match_block(i + 1, &outcome.resolve(candidate)));
    }
    text
}

/// JSON response for a generation call
///
/// Both lists are capped at `match_options`. `filteredMatches` holds the
/// displayed selection, so it carries tolerance-only candidates when `source`
/// says the constraints eliminated everything. Full pool sizes are in `stats`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MatchmakingResponse<'a> {
    #[serde(rename_all = "camelCase")]
    Success {
        success: bool,
        all_matches: Vec<ResolvedMatch<'a>>,
        filtered_matches: Vec<ResolvedMatch<'a>>,
        source: CandidateSource,
        stats: GenerationStats,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl<'a> MatchmakingResponse<'a> {
    pub fn success(
        outcome: &'a MatchmakingOutcome,
        selection: &Selection<'a>,
        match_options: usize,
    ) -> Self {
        MatchmakingResponse::Success {
            success: true,
            all_matches: outcome
                .all_matches()
                .iter()
                .take(match_options)
                .map(|m| outcome.resolve(m))
                .collect(),
            filtered_matches: selection
                .matches
                .iter()
                .map(|m| outcome.resolve(m))
                .collect(),
            source: selection.source,
            stats: outcome.stats(),
        }
    }

    pub fn failure(error: &MatchmakingError) -> Self {
        MatchmakingResponse::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
