//! Candidate enumeration
//!
//! Players are placed lane by lane (Top through Support). Each lane has a
//! [`LanePlan`] derived from the preset lanes; free lanes draw an ordered
//! (blue, red) pair from the players not yet used. A pairing whose lane gap
//! exceeds the tolerance prunes the whole branch, and the number of
//! candidates that branch would have produced is added to the raw count so
//! diagnostics still report the full search space.
//!
//! Both slots of every lane are walked in player id order, so candidates are
//! emitted in lexicographic order of their lineup ids.

use crate::config::MatchmakingConfig;
use crate::engine::outcome::{Lineup, MatchResult};
use crate::engine::PLAYERS_PER_MATCH;
use crate::types::{Player, Role, Side};
use crate::utils::{ordered_pairs, ratings_within_tolerance};
use tracing::{debug, warn};

/// Bit mask with one bit per roster index
pub(crate) type PlayerMask = u16;

pub(crate) const ALL_PLAYERS: PlayerMask = (1 << PLAYERS_PER_MATCH) - 1;

pub(crate) fn bit(index: usize) -> PlayerMask {
    1 << index
}

/// How a single lane is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePlan {
    /// Any two unpinned players, either orientation
    Free,
    /// One pinned player facing any unpinned player
    One { player: usize, side: Side },
    /// Both players pinned
    Two { blue: usize, red: usize },
}

/// Resolved lane plans for one roster
#[derive(Debug, Clone)]
pub struct SearchPlan {
    lanes: [LanePlan; 5],
    pinned: PlayerMask,
    randomize_sides: bool,
    /// Roster indices sorted by player id
    order: [usize; PLAYERS_PER_MATCH],
}

impl SearchPlan {
    /// Resolve preset lanes against the roster
    ///
    /// Returns `None` when a pin names a player missing from the roster or
    /// pins the same player twice; no candidate can exist in that case.
    pub fn resolve(players: &[Player], config: &MatchmakingConfig) -> Option<Self> {
        debug_assert_eq!(players.len(), PLAYERS_PER_MATCH);

        let mut lanes = [LanePlan::Free; 5];
        let mut pinned: PlayerMask = 0;

        for (role, pin) in config.active_pins() {
            let mut pin_player = |id: &str| -> Option<usize> {
                let Some(index) = players.iter().position(|p| p.id == id) else {
                    warn!("Preset {} lane names unknown player {}", role, id);
                    return None;
                };
                if pinned & bit(index) != 0 {
                    warn!("Player {} is pinned more than once", id);
                    return None;
                }
                pinned |= bit(index);
                Some(index)
            };

            let blue = match pin.blue.as_deref() {
                Some(id) => Some(pin_player(id)?),
                None => None,
            };
            let red = match pin.red.as_deref() {
                Some(id) => Some(pin_player(id)?),
                None => None,
            };

            lanes[role.index()] = match (blue, red) {
                (Some(blue), Some(red)) => LanePlan::Two { blue, red },
                (Some(player), None) => LanePlan::One {
                    player,
                    side: Side::Blue,
                },
                (None, Some(player)) => LanePlan::One {
                    player,
                    side: Side::Red,
                },
                (None, None) => LanePlan::Free,
            };
            debug!("Resolved {} lane plan: {:?}", role, lanes[role.index()]);
        }

        let mut order: [usize; PLAYERS_PER_MATCH] = std::array::from_fn(|index| index);
        order.sort_by(|a, b| players[*a].id.cmp(&players[*b].id).then(a.cmp(b)));

        Some(Self {
            lanes,
            pinned,
            randomize_sides: config.preset_lanes.randomize_sides,
            order,
        })
    }

    fn lane(&self, role: Role) -> LanePlan {
        self.lanes[role.index()]
    }

    fn orientations(&self) -> u64 {
        if self.randomize_sides {
            2
        } else {
            1
        }
    }

    /// Number of structurally valid candidates, ignoring tolerance
    pub fn search_space(&self) -> u64 {
        let free = (ALL_PLAYERS & !self.pinned).count_ones() as u64;
        self.completions(0, free)
    }

    /// Candidates reachable from lane `from` with `free` unpinned players left
    fn completions(&self, from: usize, free: u64) -> u64 {
        let mut remaining = free;
        let mut total: u64 = 1;
        for lane in &self.lanes[from..] {
            match lane {
                LanePlan::Free => {
                    total = total.saturating_mul(ordered_pairs(remaining));
                    remaining = remaining.saturating_sub(2);
                }
                LanePlan::One { .. } => {
                    total = total.saturating_mul(remaining * self.orientations());
                    remaining = remaining.saturating_sub(1);
                }
                LanePlan::Two { .. } => {
                    total = total.saturating_mul(self.orientations());
                }
            }
        }
        total
    }

    /// Whether `(blue, red)` is an allowed pairing for the lane
    fn accepts(&self, lane: LanePlan, blue: usize, red: usize, used: PlayerMask) -> bool {
        let unused = |index: usize| used & bit(index) == 0;
        match lane {
            LanePlan::Free => blue != red && unused(blue) && unused(red),
            LanePlan::One { player, side } => {
                let as_given = match side {
                    Side::Blue => blue == player && unused(red),
                    Side::Red => red == player && unused(blue),
                };
                let swapped = match side {
                    Side::Blue => red == player && unused(blue),
                    Side::Red => blue == player && unused(red),
                };
                as_given || (self.randomize_sides && swapped)
            }
            LanePlan::Two {
                blue: pinned_blue,
                red: pinned_red,
            } => {
                (blue == pinned_blue && red == pinned_red)
                    || (self.randomize_sides && blue == pinned_red && red == pinned_blue)
            }
        }
    }
}

/// Depth-first placement state
struct Search<'a, F> {
    players: &'a [Player],
    plan: &'a SearchPlan,
    tolerance: u8,
    lineup: Lineup,
    pruned: u64,
    emitted: u64,
    visit: F,
}

impl<F: FnMut(MatchResult)> Search<'_, F> {
    fn place(&mut self, lane: usize, used: PlayerMask) {
        if lane == Role::ALL.len() {
            debug_assert_eq!(used, ALL_PLAYERS, "candidate does not use every player");
            self.emitted += 1;
            (self.visit)(MatchResult::new(self.lineup, self.players));
            return;
        }

        let lane_plan = self.plan.lane(Role::ALL[lane]);
        let order = self.plan.order;
        for &blue in &order {
            for &red in &order {
                if self.plan.accepts(lane_plan, blue, red, used) {
                    self.try_pairing(lane, blue, red, used | bit(blue) | bit(red));
                }
            }
        }
    }

    fn try_pairing(&mut self, lane: usize, blue: usize, red: usize, used: PlayerMask) {
        let role = Role::ALL[lane];
        let blue_rating = self.players[blue].rating(role);
        let red_rating = self.players[red].rating(role);

        if ratings_within_tolerance(blue_rating, red_rating, self.tolerance) {
            self.lineup[lane] = [blue as u8, red as u8];
            self.place(lane + 1, used);
        } else {
            let free = (ALL_PLAYERS & !used).count_ones() as u64;
            self.pruned += self.plan.completions(lane + 1, free);
        }
    }
}

/// Tallies from one enumeration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnumerationCounts {
    /// Structurally valid candidates, before the tolerance filter
    pub raw: u64,
    /// Candidates handed to the visitor
    pub within_tolerance: u64,
}

/// Enumerate every candidate within tolerance, in lineup id order
pub fn enumerate<F>(
    players: &[Player],
    plan: &SearchPlan,
    tolerance: u8,
    visit: F,
) -> EnumerationCounts
where
    F: FnMut(MatchResult),
{
    let mut search = Search {
        players,
        plan,
        tolerance,
        lineup: [[0; 2]; 5],
        pruned: 0,
        emitted: 0,
        visit,
    };
    // Pinned players are only placed through their own lane plan
    search.place(0, plan.pinned);

    let counts = EnumerationCounts {
        raw: search.emitted + search.pruned,
        within_tolerance: search.emitted,
    };
    debug_assert_eq!(counts.raw, plan.search_space());
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoleRatings;

    fn roster(rating: u8) -> Vec<Player> {
        (0..10)
            .map(|i| Player::new(format!("p{}", i), format!("Player {}", i), RoleRatings::uniform(rating)))
            .collect()
    }

    fn collect(players: &[Player], config: &MatchmakingConfig) -> (Vec<MatchResult>, EnumerationCounts) {
        let plan = SearchPlan::resolve(players, config).unwrap();
        let mut found = Vec::new();
        let counts = enumerate(players, &plan, config.tolerance, |m| found.push(m));
        (found, counts)
    }

    #[test]
    fn test_search_space_without_pins() {
        let players = roster(5);
        let plan = SearchPlan::resolve(&players, &MatchmakingConfig::default()).unwrap();
        // 10 players into 10 labelled slots
        assert_eq!(plan.search_space(), 3_628_800);
    }

    #[test]
    fn test_search_space_with_pins() {
        let players = roster(5);
        let config = MatchmakingConfig::default()
            .pin_lane(Role::Top, Some("p0"), Some("p1"))
            .pin_lane(Role::Jungle, Some("p2"), Some("p3"))
            .pin_lane(Role::Mid, Some("p4"), None::<String>);
        let plan = SearchPlan::resolve(&players, &config).unwrap();

        // mid partner: 5 choices, then 4*3 for adc and 2*1 for support
        assert_eq!(plan.search_space(), 5 * 12 * 2);

        let randomized = config.randomize_sides(true);
        let plan = SearchPlan::resolve(&players, &randomized).unwrap();
        assert_eq!(plan.search_space(), 2 * 2 * (5 * 2) * 12 * 2);
    }

    #[test]
    fn test_unknown_pin_is_infeasible() {
        let players = roster(5);
        let config = MatchmakingConfig::default().pin_lane(Role::Top, Some("ghost"), None::<String>);
        assert!(SearchPlan::resolve(&players, &config).is_none());
    }

    #[test]
    fn test_double_pin_is_infeasible() {
        let players = roster(5);
        let config = MatchmakingConfig::default()
            .pin_lane(Role::Top, Some("p0"), None::<String>)
            .pin_lane(Role::Mid, Some("p0"), None::<String>);
        assert!(SearchPlan::resolve(&players, &config).is_none());
    }

    #[test]
    fn test_lane_plans() {
        let players = roster(5);
        let config = MatchmakingConfig::default()
            .pin_lane(Role::Top, Some("p0"), Some("p1"))
            .pin_lane(Role::Support, None::<String>, Some("p9"));
        let plan = SearchPlan::resolve(&players, &config).unwrap();

        assert_eq!(plan.lane(Role::Top), LanePlan::Two { blue: 0, red: 1 });
        assert_eq!(plan.lane(Role::Jungle), LanePlan::Free);
        assert_eq!(
            plan.lane(Role::Support),
            LanePlan::One {
                player: 9,
                side: Side::Red
            }
        );
    }

    #[test]
    fn test_counts_match_search_space_when_pruning() {
        let mut players = roster(5);
        players[0].ratings.set(Role::Top, 9);
        players[1].ratings.set(Role::Top, 1);
        let config = MatchmakingConfig::default()
            .with_tolerance(0)
            .pin_lane(Role::Jungle, Some("p2"), Some("p3"))
            .pin_lane(Role::Mid, Some("p4"), Some("p5"));

        let (found, counts) = collect(&players, &config);
        let plan = SearchPlan::resolve(&players, &config).unwrap();

        assert_eq!(counts.raw, plan.search_space());
        assert_eq!(counts.within_tolerance as usize, found.len());
        assert!(counts.within_tolerance < counts.raw);
        for m in &found {
            let (blue, red) = m.pairing(Role::Top);
            assert_eq!(players[blue].rating(Role::Top), players[red].rating(Role::Top));
        }
    }

    #[test]
    fn test_fixed_sides_are_respected() {
        let players = roster(5);
        let config = MatchmakingConfig::default()
            .pin_lane(Role::Top, Some("p0"), Some("p1"))
            .pin_lane(Role::Jungle, Some("p2"), None::<String>)
            .pin_lane(Role::Mid, Some("p4"), Some("p5"))
            .pin_lane(Role::Adc, Some("p6"), Some("p7"));

        let (found, _) = collect(&players, &config);
        // p3, p8, p9 are free: three jungle partners, then two orientations of support
        assert_eq!(found.len(), 3 * 2);
        for m in &found {
            assert_eq!(m.pairing(Role::Top), (0, 1));
            assert_eq!(m.pairing(Role::Jungle).0, 2);
        }
    }

    #[test]
    fn test_emitted_in_id_order() {
        let players = roster(5);
        let config = MatchmakingConfig::default()
            .pin_lane(Role::Top, Some("p0"), Some("p1"))
            .pin_lane(Role::Jungle, Some("p2"), Some("p3"))
            .randomize_sides(true);

        let (found, _) = collect(&players, &config);
        let keys: Vec<Vec<&str>> = found
            .iter()
            .map(|m| m.slots().map(|i| players[i].id.as_str()).collect())
            .collect();

        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
