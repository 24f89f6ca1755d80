//! Common types used throughout the team generator

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::MatchmakingError;

/// Unique identifier for roster players and wildcards
pub type PlayerId = String;

/// One of the five lanes a player can be assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

impl Role {
    /// All roles in lineup order
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Adc, Role::Support];

    /// Position of the role in [`Role::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Top => write!(f, "Top"),
            Role::Jungle => write!(f, "Jungle"),
            Role::Mid => write!(f, "Mid"),
            Role::Adc => write!(f, "ADC"),
            Role::Support => write!(f, "Support"),
        }
    }
}

impl FromStr for Role {
    type Err = MatchmakingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" | "jg" => Ok(Role::Jungle),
            "mid" | "middle" => Ok(Role::Mid),
            "adc" | "bot" => Ok(Role::Adc),
            "support" | "sup" => Ok(Role::Support),
            other => Err(MatchmakingError::ConfigurationError {
                message: format!("Unknown role: {}", other),
            }),
        }
    }
}

/// Team side. Blue is team 100, red is team 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub fn team_id(self) -> u16 {
        match self {
            Side::Blue => 100,
            Side::Red => 200,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => write!(f, "Blue"),
            Side::Red => write!(f, "Red"),
        }
    }
}

/// Per-role skill ratings for a player (observed range 1-10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleRatings {
    pub top: u8,
    pub jungle: u8,
    pub mid: u8,
    pub adc: u8,
    pub support: u8,
}

impl RoleRatings {
    pub fn new(top: u8, jungle: u8, mid: u8, adc: u8, support: u8) -> Self {
        Self {
            top,
            jungle,
            mid,
            adc,
            support,
        }
    }

    /// Same rating in every role
    pub fn uniform(rating: u8) -> Self {
        Self::new(rating, rating, rating, rating, rating)
    }

    pub fn get(&self, role: Role) -> u8 {
        match role {
            Role::Top => self.top,
            Role::Jungle => self.jungle,
            Role::Mid => self.mid,
            Role::Adc => self.adc,
            Role::Support => self.support,
        }
    }

    pub fn set(&mut self, role: Role, rating: u8) {
        match role {
            Role::Top => self.top = rating,
            Role::Jungle => self.jungle = rating,
            Role::Mid => self.mid = rating,
            Role::Adc => self.adc = rating,
            Role::Support => self.support = rating,
        }
    }
}

/// Player information for matchmaking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "deserialize_player_id")]
    pub id: PlayerId,
    pub name: String,
    #[serde(flatten)]
    pub ratings: RoleRatings,
    /// Ad hoc player that only exists for one session
    #[serde(default)]
    pub wildcard: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, ratings: RoleRatings) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ratings,
            wildcard: false,
        }
    }

    /// Create a wildcard player with a fresh random id
    pub fn wildcard(name: impl Into<String>, ratings: RoleRatings) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            ratings,
            wildcard: true,
        }
    }

    pub fn rating(&self, role: Role) -> u8 {
        self.ratings.get(role)
    }
}

/// Roster exports store ids either as strings or as numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayerId {
    Text(String),
    Number(u64),
}

fn deserialize_player_id<'de, D>(deserializer: D) -> Result<PlayerId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawPlayerId::deserialize(deserializer)? {
        RawPlayerId::Text(id) => id,
        RawPlayerId::Number(id) => id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order_and_index() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert!(Role::Top < Role::Support);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Top".parse::<Role>().unwrap(), Role::Top);
        assert_eq!("jg".parse::<Role>().unwrap(), Role::Jungle);
        assert_eq!(" ADC ".parse::<Role>().unwrap(), Role::Adc);
        assert_eq!("bot".parse::<Role>().unwrap(), Role::Adc);
        assert_eq!("sup".parse::<Role>().unwrap(), Role::Support);
        assert!("carry".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Adc).unwrap(), "\"adc\"");
        let role: Role = serde_json::from_str("\"jungle\"").unwrap();
        assert_eq!(role, Role::Jungle);
    }

    #[test]
    fn test_side_team_ids() {
        assert_eq!(Side::Blue.team_id(), 100);
        assert_eq!(Side::Red.team_id(), 200);
    }

    #[test]
    fn test_ratings_lookup() {
        let mut ratings = RoleRatings::new(1, 2, 3, 4, 5);
        assert_eq!(ratings.get(Role::Mid), 3);
        assert_eq!(ratings.get(Role::Support), 5);
        ratings.set(Role::Top, 9);
        assert_eq!(ratings.get(Role::Top), 9);
    }

    #[test]
    fn test_player_deserialize_numeric_id() {
        let player: Player = serde_json::from_str(
            r#"{"id": 42, "name": "Caps", "top": 3, "jungle": 4, "mid": 9, "adc": 5, "support": 2}"#,
        )
        .unwrap();

        assert_eq!(player.id, "42");
        assert_eq!(player.rating(Role::Mid), 9);
        assert!(!player.wildcard);
    }

    #[test]
    fn test_wildcard_players_get_unique_ids() {
        let a = Player::wildcard("Guest", RoleRatings::uniform(5));
        let b = Player::wildcard("Guest", RoleRatings::uniform(5));

        assert!(a.wildcard);
        assert_ne!(a.id, b.id);
    }
}
