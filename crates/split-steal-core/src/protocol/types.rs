//! Protocol types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Unique game identifier, allocated monotonically by the registry
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameId(u128);

impl GameId {
    /// Create from a raw counter value
    pub fn new(value: u128) -> Self {
        Self(value)
    }

    /// Get the underlying counter value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl FromStr for GameId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameId({})", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Decimal string keeps u128 lossless for JSON consumers
impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.0.to_string().serialize(s)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A player's decision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// No verified reveal yet
    #[default]
    NotMade,
    Split,
    Steal,
}

impl Decision {
    /// Fixed-width discriminant used in the commitment encoding
    pub fn as_byte(&self) -> u8 {
        match self {
            Decision::NotMade => 0,
            Decision::Split => 1,
            Decision::Steal => 2,
        }
    }

    /// Has a verified decision been recorded?
    pub fn is_made(&self) -> bool {
        !matches!(self, Decision::NotMade)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::NotMade => "not_made",
            Decision::Split => "split",
            Decision::Steal => "steal",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_serializes_as_string() {
        let id = GameId::new(u128::MAX);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));

        let back: GameId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_decision_bytes_are_distinct() {
        let bytes = [
            Decision::NotMade.as_byte(),
            Decision::Split.as_byte(),
            Decision::Steal.as_byte(),
        ];
        assert_eq!(bytes, [0, 1, 2]);
    }

    #[test]
    fn test_decision_default_is_not_made() {
        assert_eq!(Decision::default(), Decision::NotMade);
        assert!(!Decision::NotMade.is_made());
        assert!(Decision::Split.is_made());
    }
}
