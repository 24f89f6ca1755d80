//! Shared rosters and helpers for integration testing

#![allow(dead_code)]

use rift_matchmaker::engine::MatchResult;
use rift_matchmaker::types::{Player, Role, RoleRatings};
use std::collections::HashSet;

/// Build a player from `[top, jungle, mid, adc, support]`
pub fn player(id: &str, ratings: [u8; 5]) -> Player {
    let [top, jungle, mid, adc, support] = ratings;
    Player::new(
        id,
        format!("Player {}", id),
        RoleRatings::new(top, jungle, mid, adc, support),
    )
}

/// Ten players with the same rating everywhere
pub fn uniform_roster(rating: u8) -> Vec<Player> {
    (0..10)
        .map(|i| player(&format!("p{}", i), [rating; 5]))
        .collect()
}

/// Five pairs of identical players (`p0`/`p1`, `p2`/`p3`, ...)
///
/// In every role the pairs are rated 1, 3, 5, 7 and 9 in some order, so with
/// a tolerance below 2 a lane can only be contested by twins.
pub fn twin_roster() -> Vec<Player> {
    (0..10usize)
        .map(|i| {
            let pair = i / 2;
            let ratings = [0usize, 1, 2, 3, 4].map(|role| 1 + 2 * ((pair + role) % 5) as u8);
            player(&format!("p{}", i), ratings)
        })
        .collect()
}

/// Twin roster except `p0` is rated 10 in top and everyone else 1
pub fn top_outlier_roster() -> Vec<Player> {
    let mut players = twin_roster();
    for (i, player) in players.iter_mut().enumerate() {
        player.ratings.set(Role::Top, if i == 0 { 10 } else { 1 });
    }
    players
}

/// A plausible community lobby with uneven role strengths
pub fn league_roster() -> Vec<Player> {
    vec![
        player("zeus", [9, 4, 6, 3, 2]),
        player("oner", [5, 9, 5, 3, 4]),
        player("faker", [7, 6, 10, 6, 5]),
        player("gumayusi", [3, 2, 5, 9, 4]),
        player("keria", [2, 4, 5, 5, 10]),
        player("kiin", [8, 3, 5, 2, 3]),
        player("canyon", [4, 8, 6, 3, 3]),
        player("chovy", [6, 5, 9, 5, 3]),
        player("peyz", [2, 3, 4, 8, 3]),
        player("lehends", [3, 5, 4, 4, 8]),
    ]
}

/// Index of a player id in a roster
pub fn index_of(players: &[Player], id: &str) -> usize {
    players
        .iter()
        .position(|p| p.id == id)
        .unwrap_or_else(|| panic!("{} not in roster", id))
}

/// Every roster index appears exactly once in the candidate
pub fn assert_complete_partition(candidate: &MatchResult) {
    let slots: Vec<usize> = candidate.slots().collect();
    let unique: HashSet<usize> = slots.iter().copied().collect();
    assert_eq!(slots.len(), 10);
    assert_eq!(unique, (0..10).collect::<HashSet<_>>());
}

/// Every lane matchup is within `tolerance`
pub fn assert_within_tolerance(players: &[Player], candidate: &MatchResult, tolerance: u8) {
    for role in Role::ALL {
        let (blue, red) = candidate.pairing(role);
        let gap = players[blue].rating(role).abs_diff(players[red].rating(role));
        assert!(
            gap <= tolerance,
            "{} gap {} exceeds tolerance {}",
            role,
            gap,
            tolerance
        );
    }
}
