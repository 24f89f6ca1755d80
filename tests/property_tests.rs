//! Property tests for the generation guarantees

mod fixtures;

use proptest::prelude::*;
use rift_matchmaker::config::MatchmakingConfig;
use rift_matchmaker::engine::{generate_matches, scoring};
use rift_matchmaker::sampling::MatchSampler;
use rift_matchmaker::types::{Player, Role, Side};
use std::collections::HashSet;

use fixtures::{assert_complete_partition, assert_within_tolerance, player};

fn roster_strategy() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(prop::array::uniform5(1u8..=10), 10).prop_map(|ratings| {
        ratings
            .into_iter()
            .enumerate()
            .map(|(i, r)| player(&format!("p{}", i), r))
            .collect()
    })
}

/// Top and jungle pinned so the search stays small
fn base_config(tolerance: u8, randomize: bool) -> MatchmakingConfig {
    MatchmakingConfig::default()
        .with_tolerance(tolerance)
        .with_match_options(3)
        .pin_lane(Role::Top, Some("p0"), Some("p1"))
        .pin_lane(Role::Jungle, Some("p2"), None::<String>)
        .randomize_sides(randomize)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_candidates_are_complete_and_within_tolerance(
        players in roster_strategy(),
        tolerance in 0u8..=4,
        randomize in any::<bool>(),
    ) {
        let outcome = generate_matches(&players, &base_config(tolerance, randomize)).unwrap();

        prop_assert!(outcome.stats().raw_candidates >= outcome.all_matches().len() as u64);
        for candidate in outcome.all_matches() {
            assert_complete_partition(candidate);
            assert_within_tolerance(&players, candidate, tolerance);

            let (top_blue, top_red) = candidate.pairing(Role::Top);
            prop_assert_eq!(HashSet::from([top_blue, top_red]), HashSet::from([0, 1]));
            if !randomize {
                prop_assert_eq!((top_blue, top_red), (0, 1));
                prop_assert_eq!(candidate.pairing(Role::Jungle).0, 2);
            }
        }
    }

    #[test]
    fn prop_scores_are_ranked_and_consistent(
        players in roster_strategy(),
        tolerance in 0u8..=4,
    ) {
        let outcome = generate_matches(&players, &base_config(tolerance, false)).unwrap();
        prop_assert!(scoring::is_ranked(outcome.all_matches()));

        for candidate in outcome.all_matches() {
            let blue: u32 = Role::ALL
                .iter()
                .map(|role| u32::from(players[candidate.player_at(*role, Side::Blue)].rating(*role)))
                .sum();
            let red: u32 = Role::ALL
                .iter()
                .map(|role| u32::from(players[candidate.player_at(*role, Side::Red)].rating(*role)))
                .sum();
            prop_assert_eq!(candidate.score().blue, blue);
            prop_assert_eq!(candidate.score().red, red);
        }
    }

    #[test]
    fn prop_constraints_hold_and_filtered_is_subset(
        players in roster_strategy(),
        tolerance in 1u8..=5,
        avoid_player in 3usize..10,
        avoid_role in prop::sample::select(Role::ALL.to_vec()),
        combo in prop::sample::subsequence((3usize..10).collect::<Vec<_>>(), 2..=3),
    ) {
        let config = base_config(tolerance, false)
            .avoid(format!("p{}", avoid_player), avoid_role)
            .combo(combo.iter().map(|i| format!("p{}", i)));
        let outcome = generate_matches(&players, &config).unwrap();

        let all: HashSet<_> = outcome.all_matches().iter().collect();
        prop_assert!(scoring::is_ranked(outcome.filtered_matches()));
        for candidate in outcome.filtered_matches() {
            prop_assert!(all.contains(candidate));

            let (blue, red) = candidate.pairing(avoid_role);
            prop_assert!(blue != avoid_player && red != avoid_player);

            let sides: HashSet<Side> = combo
                .iter()
                .filter_map(|index| candidate.side_of(*index))
                .collect();
            prop_assert_eq!(sides.len(), 1);
        }
    }

    #[test]
    fn prop_selection_never_exceeds_match_options(
        players in roster_strategy(),
        match_options in 1usize..8,
        seed in any::<u64>(),
    ) {
        let config = base_config(3, true).with_match_options(match_options);
        let outcome = generate_matches(&players, &config).unwrap();

        let selection = outcome.selection(&config, &MatchSampler::shuffle_ties(Some(seed)));
        prop_assert!(selection.matches.len() <= match_options);
        let repeat = outcome.selection(&config, &MatchSampler::shuffle_ties(Some(seed)));
        prop_assert_eq!(selection.matches, repeat.matches);
    }
}
