//! Hard constraints applied after the tolerance filter
//!
//! Avoid-role rules and player combos are compiled once per call into roster
//! bit masks, so checking a candidate is a handful of mask operations.

use crate::config::MatchmakingConfig;
use crate::engine::generator::{bit, PlayerMask};
use crate::engine::outcome::MatchResult;
use crate::types::{Player, Role, Side};
use tracing::{debug, warn};

/// Compiled avoid-role rules and player combos
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    /// Players (by id match) that may not take the lane
    avoid: Vec<(PlayerMask, Role)>,
    /// Players that must share a side
    combos: Vec<PlayerMask>,
    /// A combo names a player missing from the roster
    unsatisfiable: bool,
}

impl ConstraintSet {
    pub fn compile(players: &[Player], config: &MatchmakingConfig) -> Self {
        let mut set = Self::default();
        let mask_of = |id: &str| -> PlayerMask {
            players
                .iter()
                .enumerate()
                .filter(|(_, p)| p.id == id)
                .fold(0, |mask, (index, _)| mask | bit(index))
        };

        if config.avoid_roles.enabled {
            for rule in &config.avoid_roles.rules {
                let mask = mask_of(&rule.player_id);
                if mask == 0 {
                    debug!(
                        "Ignoring avoid-role rule for {}: not in roster",
                        rule.player_id
                    );
                    continue;
                }
                set.avoid.push((mask, rule.lane));
            }
        }

        if config.player_combos.enabled {
            for combo in &config.player_combos.combos {
                let mut mask = 0;
                for id in combo {
                    let member = mask_of(id);
                    if member == 0 {
                        warn!("Player combo names {} who is not in the roster", id);
                        set.unsatisfiable = true;
                    }
                    mask |= member;
                }
                set.combos.push(mask);
            }
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        self.avoid.is_empty() && self.combos.is_empty() && !self.unsatisfiable
    }

    /// Whether a candidate satisfies every compiled constraint
    pub fn allows(&self, candidate: &MatchResult) -> bool {
        if self.unsatisfiable {
            return false;
        }

        let avoided = self.avoid.iter().any(|(mask, role)| {
            let (blue, red) = candidate.pairing(*role);
            mask & (bit(blue) | bit(red)) != 0
        });
        if avoided {
            return false;
        }

        let blue_team = candidate.team_mask(Side::Blue);
        self.combos.iter().all(|mask| {
            let on_blue = mask & blue_team;
            on_blue == 0 || on_blue == *mask
        })
    }
}
