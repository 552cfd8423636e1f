//! Service configuration.

use guessduel_engine::MatchConfig;
use guessduel_room::DEFAULT_CHANNEL_SIZE;
use serde::{Deserialize, Serialize};

use crate::DuelError;

/// Settings for a [`DuelService`](crate::DuelService).
///
/// Every field has a default, so `{}` is a valid config:
///
/// ```rust
/// use guessduel::DuelConfig;
///
/// let config = DuelConfig::from_json(r#"{ "default_match": { "target_points": 5 } }"#).unwrap();
/// assert_eq!(config.default_match.target_points, 5);
/// assert_eq!(config.room_channel_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Rules used when a room is created without its own config.
    pub default_match: MatchConfig,

    /// Command queue depth per room actor.
    pub room_channel_size: usize,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            default_match: MatchConfig::default(),
            room_channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

impl DuelConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    /// Returns [`DuelError::Config`] for malformed JSON or a zero channel
    /// size, and [`DuelError::Engine`] for invalid match rules.
    pub fn from_json(raw: &str) -> Result<Self, DuelError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| DuelError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DuelError> {
        if self.room_channel_size == 0 {
            return Err(DuelError::Config("room_channel_size must be at least 1".into()));
        }
        self.default_match.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_empty_object_is_default() {
        assert_eq!(DuelConfig::from_json("{}").unwrap(), DuelConfig::default());
    }

    #[test]
    fn test_from_json_reads_rule_toggles() {
        let raw = r#"{
            "default_match": { "allow_negative": true, "rules": { "traps": true, "bluff": true } },
            "room_channel_size": 8
        }"#;
        let config = DuelConfig::from_json(raw).unwrap();
        assert!(config.default_match.allow_negative);
        assert!(config.default_match.rules.traps);
        assert!(!config.default_match.rules.roles);
        assert_eq!(config.room_channel_size, 8);
    }

    #[test]
    fn test_from_json_malformed_is_config_error() {
        let err = DuelConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, DuelError::Config(_)));
    }

    #[test]
    fn test_from_json_zero_channel_is_rejected() {
        let err = DuelConfig::from_json(r#"{ "room_channel_size": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("room_channel_size"));
    }

    #[test]
    fn test_from_json_invalid_match_is_engine_error() {
        let err = DuelConfig::from_json(r#"{ "default_match": { "target_points": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, DuelError::Engine(_)));
    }
}
