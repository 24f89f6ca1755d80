//! Player roster loading and selection
//!
//! A roster is the exported player list (a JSON array of player records).
//! The generator needs ten of them; [`Roster::select`] picks them by id and
//! wildcard players can be added for a single session without touching the
//! roster itself.

use crate::error::{MatchmakingError, Result};
use crate::types::{Player, PlayerId, Role, RoleRatings};
use anyhow::Context;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Lowest and highest accepted role rating
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

/// Validated list of roster players
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new(players: Vec<Player>) -> std::result::Result<Self, MatchmakingError> {
        let mut seen = HashSet::new();
        for player in &players {
            if !seen.insert(player.id.as_str()) {
                return Err(MatchmakingError::InvalidRoster {
                    reason: format!("duplicate player id {}", player.id),
                });
            }
            validate_ratings(&player.name, &player.ratings)?;
        }
        Ok(Self { players })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let players: Vec<Player> = serde_json::from_str(json).context("Invalid roster JSON")?;
        Ok(Self::new(players)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        let roster = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to load roster {}", path.display()))?;
        debug!("Loaded {} players from {}", roster.len(), path.display());
        Ok(roster)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players with the given ids, in the given order
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> std::result::Result<Vec<Player>, MatchmakingError> {
        ids.iter()
            .map(|id| {
                self.get(id.as_ref())
                    .cloned()
                    .ok_or_else(|| MatchmakingError::PlayerNotFound {
                        player_id: id.as_ref().to_string(),
                    })
            })
            .collect()
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }
}

fn validate_ratings(name: &str, ratings: &RoleRatings) -> std::result::Result<(), MatchmakingError> {
    for role in Role::ALL {
        let rating = ratings.get(role);
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(MatchmakingError::InvalidRoster {
                reason: format!(
                    "{} has {} rating {}, expected {}-{}",
                    name, role, rating, MIN_RATING, MAX_RATING
                ),
            });
        }
    }
    Ok(())
}

/// Parse a wildcard spec of the form `Name:top,jungle,mid,adc,support`
pub fn parse_wildcard(spec: &str) -> std::result::Result<Player, MatchmakingError> {
    let invalid = |reason: String| MatchmakingError::InvalidRoster { reason };

    let (name, ratings) = spec
        .rsplit_once(':')
        .ok_or_else(|| invalid(format!("wildcard '{}' must look like Name:t,j,m,a,s", spec)))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(format!("wildcard '{}' has no name", spec)));
    }

    let values = ratings
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<u8>()
                .map_err(|_| invalid(format!("wildcard {} has invalid rating '{}'", name, value)))
        })
        .collect::<std::result::Result<Vec<u8>, _>>()?;

    let &[top, jungle, mid, adc, support] = &values[..] else {
        return Err(invalid(format!(
            "wildcard {} needs 5 ratings, got {}",
            name,
            values.len()
        )));
    };

    let ratings = RoleRatings::new(top, jungle, mid, adc, support);
    validate_ratings(name, &ratings)?;
    Ok(Player::wildcard(name, ratings))
}
