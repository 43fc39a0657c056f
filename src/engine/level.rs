//! Difficulty levels
//!
//! Every game selects its per-level constants from a fixed three-level set.
//! The set is closed: once a tag has been parsed into a [`Level`], no lookup
//! inside the engine can fail.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Difficulty level chosen at session start. Never changes mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Tag used in result payloads and UI, matching the level selector values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            other => Err(ConfigError::UnknownLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!("easy".parse::<Level>().unwrap(), Level::Easy);
        assert_eq!("Medium".parse::<Level>().unwrap(), Level::Medium);
        assert_eq!("HARD".parse::<Level>().unwrap(), Level::Hard);
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let err = "extreme".parse::<Level>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownLevel("extreme".to_string()));
    }
}
