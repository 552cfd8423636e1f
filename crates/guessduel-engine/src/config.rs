//! Match configuration: fixed at room creation, immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::EngineError;
use crate::rules::{HIDDEN_MAX, HIDDEN_MIN, NUM_MAX, NUM_MIN, NumberRange};

// ---------------------------------------------------------------------------
// RuleToggles
// ---------------------------------------------------------------------------

/// Optional mechanics a room can switch on. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleToggles {
    /// Kill traps and info traps.
    pub traps: bool,
    /// Staged false hints and the believe/accuse decision.
    pub bluff: bool,
    pub guess_flag: bool,
    pub digit_declaration: bool,
    pub sudden_press: bool,
    pub roles: bool,
    pub yes_no: bool,
    /// Second role for a price. Only meaningful with `roles`.
    pub devotion: bool,
}

impl RuleToggles {
    /// Every mechanic enabled.
    pub fn all() -> Self {
        Self {
            traps: true,
            bluff: true,
            guess_flag: true,
            digit_declaration: true,
            sudden_press: true,
            roles: true,
            yes_no: true,
            devotion: true,
        }
    }
}

// ---------------------------------------------------------------------------
// MatchConfig
// ---------------------------------------------------------------------------

/// Settings for one match.
///
/// ```
/// use guessduel_engine::{MatchConfig, RuleToggles};
///
/// let config = MatchConfig {
///     target_points: 1,
///     rules: RuleToggles { traps: true, ..RuleToggles::default() },
///     ..MatchConfig::default()
/// };
/// assert_eq!(config.secret_range().bounds(), (1, 50));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Widens secrets to −50..=50 and the hidden number to ±1..=30.
    pub allow_negative: bool,
    /// First player to reach this many round wins takes the match.
    pub target_points: u32,
    pub rules: RuleToggles,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            allow_negative: false,
            target_points: 3,
            rules: RuleToggles::default(),
        }
    }
}

impl MatchConfig {
    /// Legal values for secrets, guesses and trap placements.
    pub fn secret_range(&self) -> NumberRange {
        if self.allow_negative {
            NumberRange::new(-NUM_MAX, NUM_MAX)
        } else {
            NumberRange::new(NUM_MIN, NUM_MAX)
        }
    }

    /// Legal values for the hidden number.
    pub fn hidden_range(&self) -> NumberRange {
        if self.allow_negative {
            NumberRange::new(-HIDDEN_MAX, HIDDEN_MAX).without_zero()
        } else {
            NumberRange::new(HIDDEN_MIN, HIDDEN_MAX)
        }
    }

    /// Rejects configurations no match can be played under.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.target_points == 0 {
            return Err(EngineError::Validation(
                "target points must be at least 1".into(),
            ));
        }
        if self.rules.devotion && !self.rules.roles {
            return Err(EngineError::Validation(
                "devotion requires the roles rule".into(),
            ));
        }
        Ok(())
    }
}
