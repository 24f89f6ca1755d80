//! Team generation parameters
//!
//! [`MatchmakingConfig`] is the fully-formed value handed to the engine for a
//! single generation call. The builder methods exist so callers (the CLI, a
//! form handler, tests) can assemble it step by step.

use crate::error::MatchmakingError;
use crate::types::{PlayerId, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Largest meaningful tolerance for ratings in the 1-10 range
pub const MAX_TOLERANCE: u8 = 9;

/// Allowed size of a player combo
pub const MIN_COMBO_SIZE: usize = 2;
pub const MAX_COMBO_SIZE: usize = 5;

/// Run parameters for one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingConfig {
    /// How many candidates to display (not a search bound)
    pub match_options: usize,
    /// Maximum rating gap between lane opponents
    pub tolerance: u8,
    pub preset_lanes: PresetLanes,
    pub avoid_roles: AvoidRoles,
    pub player_combos: PlayerCombos,
}

/// Players pinned to specific lanes before free assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetLanes {
    pub enabled: bool,
    /// Let pinned players appear on either side
    pub randomize_sides: bool,
    pub lanes: BTreeMap<Role, LanePin>,
}

/// Zero, one or two players pinned to a lane, one per side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanePin {
    pub blue: Option<PlayerId>,
    pub red: Option<PlayerId>,
}

impl LanePin {
    pub fn is_empty(&self) -> bool {
        self.blue.is_none() && self.red.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidRoles {
    pub enabled: bool,
    pub rules: Vec<AvoidRoleRule>,
}

/// Forbid a player from a lane on either team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvoidRoleRule {
    pub player_id: PlayerId,
    pub lane: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCombos {
    pub enabled: bool,
    /// Groups of players that must share a team
    pub combos: Vec<Vec<PlayerId>>,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            match_options: 5,
            tolerance: 2,
            preset_lanes: PresetLanes::default(),
            avoid_roles: AvoidRoles::default(),
            player_combos: PlayerCombos::default(),
        }
    }
}

impl MatchmakingConfig {
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_match_options(mut self, match_options: usize) -> Self {
        self.match_options = match_options;
        self
    }

    /// Pin players to a lane and enable preset lanes
    pub fn pin_lane(
        mut self,
        role: Role,
        blue: Option<impl Into<PlayerId>>,
        red: Option<impl Into<PlayerId>>,
    ) -> Self {
        self.preset_lanes.enabled = true;
        self.preset_lanes.lanes.insert(
            role,
            LanePin {
                blue: blue.map(Into::into),
                red: red.map(Into::into),
            },
        );
        self
    }

    pub fn randomize_sides(mut self, randomize: bool) -> Self {
        self.preset_lanes.randomize_sides = randomize;
        self
    }

    /// Add an avoid-role rule and enable the rule set
    pub fn avoid(mut self, player_id: impl Into<PlayerId>, lane: Role) -> Self {
        self.avoid_roles.enabled = true;
        self.avoid_roles.rules.push(AvoidRoleRule {
            player_id: player_id.into(),
            lane,
        });
        self
    }

    /// Add a player combo and enable combos
    pub fn combo<I, S>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        self.player_combos.enabled = true;
        self.player_combos
            .combos
            .push(players.into_iter().map(Into::into).collect());
        self
    }

    /// Active lane pins, or nothing when preset lanes are disabled
    pub fn active_pins(&self) -> impl Iterator<Item = (Role, &LanePin)> {
        self.preset_lanes
            .lanes
            .iter()
            .filter(move |(_, pin)| self.preset_lanes.enabled && !pin.is_empty())
            .map(|(role, pin)| (*role, pin))
    }

    /// Validate configuration values
    ///
    /// The engine never calls this: contradictory settings simply produce an
    /// empty candidate pool. Loaders use it to reject obviously broken input.
    pub fn validate(&self) -> Result<(), MatchmakingError> {
        if self.match_options == 0 {
            return Err(config_error("match_options must be greater than 0"));
        }
        if self.tolerance > MAX_TOLERANCE {
            return Err(config_error(format!(
                "tolerance must be at most {}",
                MAX_TOLERANCE
            )));
        }

        let mut pinned = HashSet::new();
        for (role, pin) in self.active_pins() {
            if pin.blue.is_some() && pin.blue == pin.red {
                return Err(config_error(format!(
                    "{} lane pins the same player on both sides",
                    role
                )));
            }
            for id in pin.blue.iter().chain(pin.red.iter()) {
                if !pinned.insert(id) {
                    return Err(config_error(format!(
                        "player {} is pinned to more than one lane",
                        id
                    )));
                }
            }
        }

        if self.player_combos.enabled {
            for combo in &self.player_combos.combos {
                if !(MIN_COMBO_SIZE..=MAX_COMBO_SIZE).contains(&combo.len()) {
                    return Err(config_error(format!(
                        "player combos must have {} to {} members, got {}",
                        MIN_COMBO_SIZE,
                        MAX_COMBO_SIZE,
                        combo.len()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> MatchmakingError {
    MatchmakingError::ConfigurationError {
        message: message.into(),
    }
}
