//! Core vocabulary for Guessduel.
//!
//! Every type in this module is plain data: the engine produces and
//! consumes them, the room directory ferries them between tasks, and a
//! presentation layer decodes them from form posts or JSON bodies.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// One of the two seats in a duel.
///
/// Every per-player field in the engine is indexed by this enum instead
/// of by a string key, so a `match` over it is always exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Both slots in seat order.
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Zero-based index, for fixed two-element arrays.
    pub fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// One-based seat number as shown to humans.
    pub fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// A unique identifier for a room (one match between two players).
///
/// `#[serde(transparent)]` keeps it a bare number on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Game vocabulary
// ---------------------------------------------------------------------------

/// The arithmetic relation a hint reveals between the opponent's secret
/// and the round's hidden number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    Sum,
    Diff,
    Product,
}

impl HintKind {
    /// The full hint stock a player starts each round with.
    pub const ALL: [HintKind; 3] = [HintKind::Sum, HintKind::Diff, HintKind::Product];

    /// Computes this hint's value for a secret against the hidden number.
    pub fn compute(self, secret: i32, hidden: i32) -> i32 {
        match self {
            Self::Sum => secret + hidden,
            Self::Diff => (secret - hidden).abs(),
            Self::Product => secret * hidden,
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Diff => write!(f, "difference"),
            Self::Product => write!(f, "product"),
        }
    }
}

/// Secret per-round roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Standing right to choose the hint type; hints carry no cooldown.
    Scholar,
    /// Nullifies the first skip-next-turn assignment of the round.
    Guardian,
    /// Info-trap cap +3.
    Trapper,
    /// Removes one random opponent info trap at a turn start, once.
    Disarmer,
    /// Opponent's real hints are shown off by one; harsher accuse penalty.
    Trickster,
    /// Three yes/no questions per round instead of one.
    Analyst,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Scholar,
        Role::Guardian,
        Role::Trapper,
        Role::Disarmer,
        Role::Trickster,
        Role::Analyst,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scholar => "Scholar",
            Self::Guardian => "Guardian",
            Self::Trapper => "Trapper",
            Self::Disarmer => "Disarmer",
            Self::Trickster => "Trickster",
            Self::Analyst => "Analyst",
        };
        f.write_str(name)
    }
}

/// A yes/no question about the opponent's secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// `secret >= value`
    AtLeast { value: i32 },
    /// `secret <= value`
    AtMost { value: i32 },
    /// `low <= secret <= high`, bounds taken in either order.
    Between { low: i32, high: i32 },
}

impl Predicate {
    /// Returns the predicate with `Between` bounds in ascending order.
    pub fn normalized(self) -> Self {
        match self {
            Self::Between { low, high } if low > high => Self::Between {
                low: high,
                high: low,
            },
            other => other,
        }
    }

    pub fn evaluate(self, secret: i32) -> bool {
        match self.normalized() {
            Self::AtLeast { value } => secret >= value,
            Self::AtMost { value } => secret <= value,
            Self::Between { low, high } => (low..=high).contains(&secret),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized() {
            Self::AtLeast { value } => write!(f, "secret >= {value}"),
            Self::AtMost { value } => write!(f, "secret <= {value}"),
            Self::Between { low, high } => write!(f, "{low} <= secret <= {high}"),
        }
    }
}

/// A hint type together with the value the recipient is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintReading {
    pub kind: HintKind,
    pub value: i32,
}

impl fmt::Display for HintReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.kind, self.value)
    }
}

// ---------------------------------------------------------------------------
// Actions, decisions, directives
// ---------------------------------------------------------------------------

/// A game action requested by the player whose turn it is.
///
/// Internally tagged so a form post can be mapped to
/// `{"action": "guess", "value": 17}` with no extra nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Guess { value: i32 },
    /// `choose` carries the requested type when the player wants to use
    /// a type-choice right.
    Hint { choose: Option<HintKind> },
    ChangeSecret { value: i32 },
    SetKillTrap { value: i32 },
    /// `bulk == false` places for free against the per-turn quota;
    /// `bulk == true` places up to three and ends the turn.
    SetInfoTraps { values: Vec<i32>, bulk: bool },
    SetBluff { kind: HintKind, value: i32 },
    ArmGuessFlag,
    DeclareLastDigit { digit: u8 },
    ChallengeDeclaration,
    Devote,
    YesNo { predicate: Predicate },
    /// Declines a pending free guess or sudden-press follow-up.
    Decline,
}

impl Action {
    /// Short stable name used in tracing fields.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Guess { .. } => "guess",
            Self::Hint { .. } => "hint",
            Self::ChangeSecret { .. } => "change_secret",
            Self::SetKillTrap { .. } => "set_kill_trap",
            Self::SetInfoTraps { .. } => "set_info_traps",
            Self::SetBluff { .. } => "set_bluff",
            Self::ArmGuessFlag => "arm_guess_flag",
            Self::DeclareLastDigit { .. } => "declare_last_digit",
            Self::ChallengeDeclaration => "challenge_declaration",
            Self::Devote => "devote",
            Self::YesNo { .. } => "yes_no",
            Self::Decline => "decline",
        }
    }
}

/// The answer to an outstanding [`DecisionKind::HintBluff`] or
/// [`DecisionKind::Devotion`] prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Believe,
    Accuse,
    PickRole { role: Role },
}

/// What kind of sub-action the engine is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// Believe or accuse the hint preview.
    HintBluff,
    /// Pick a second role from the offered set.
    Devotion,
    /// One free guess after catching a false digit declaration.
    FreeGuess,
    /// One immediate follow-up guess after a miss.
    SuddenPress,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HintBluff => "hint decision",
            Self::Devotion => "devotion pick",
            Self::FreeGuess => "free guess",
            Self::SuddenPress => "sudden-press follow-up",
        };
        f.write_str(name)
    }
}

/// What the caller should do after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum Directive {
    /// The same player acts again.
    Continue,
    /// Control passed; `next` is whose turn it is now (skips already
    /// resolved).
    Switch { next: PlayerSlot },
    /// The round is over.
    RoundEnd { winner: PlayerSlot },
    /// The acting player must answer a prompt before anything else.
    AwaitDecision { kind: DecisionKind },
}

/// The lifecycle phase of a match.
///
/// ```text
/// AwaitingSecret → InPlay → RoundEnded → Intermission → AwaitingSecret …
///                                     ↘ MatchEnded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "slot", rename_all = "snake_case")]
pub enum RoundPhase {
    /// Waiting for this slot's secret (the lowest slot still missing).
    AwaitingSecret(PlayerSlot),
    InPlay,
    /// A winner is recorded but the round has not been scored yet.
    RoundEnded(PlayerSlot),
    /// Round scored, waiting for the next round to be requested.
    Intermission,
    MatchEnded,
}

impl RoundPhase {
    pub fn is_in_play(&self) -> bool {
        matches!(self, Self::InPlay)
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingSecret(slot) => write!(f, "AwaitingSecret({slot})"),
            Self::InPlay => write!(f, "InPlay"),
            Self::RoundEnded(slot) => write!(f, "RoundEnded({slot})"),
            Self::Intermission => write!(f, "Intermission"),
            Self::MatchEnded => write!(f, "MatchEnded"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_slot_other_is_involution() {
        for slot in PlayerSlot::BOTH {
            assert_ne!(slot.other(), slot);
            assert_eq!(slot.other().other(), slot);
        }
    }

    #[test]
    fn test_player_slot_index_and_display() {
        assert_eq!(PlayerSlot::One.index(), 0);
        assert_eq!(PlayerSlot::Two.index(), 1);
        assert_eq!(PlayerSlot::Two.to_string(), "P2");
    }

    #[test]
    fn test_room_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&RoomId(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(RoomId(7).to_string(), "R-7");
    }

    #[test]
    fn test_hint_kind_compute() {
        assert_eq!(HintKind::Sum.compute(20, 5), 25);
        assert_eq!(HintKind::Diff.compute(5, 20), 15);
        assert_eq!(HintKind::Product.compute(-4, 6), -24);
    }

    #[test]
    fn test_predicate_between_is_order_normalized() {
        let p = Predicate::Between { low: 30, high: 10 };
        assert!(p.evaluate(10));
        assert!(p.evaluate(30));
        assert!(!p.evaluate(31));
        assert_eq!(p.to_string(), "10 <= secret <= 30");
    }

    #[test]
    fn test_predicate_bounds_are_inclusive() {
        assert!(Predicate::AtLeast { value: 12 }.evaluate(12));
        assert!(!Predicate::AtLeast { value: 12 }.evaluate(11));
        assert!(Predicate::AtMost { value: -3 }.evaluate(-3));
        assert!(!Predicate::AtMost { value: -3 }.evaluate(0));
    }

    #[test]
    fn test_action_is_internally_tagged() {
        let json = serde_json::to_value(Action::SetInfoTraps {
            values: vec![3, 4],
            bulk: true,
        })
        .unwrap();
        assert_eq!(json["action"], "set_info_traps");
        assert_eq!(json["bulk"], true);
        let unit = serde_json::to_value(Action::ArmGuessFlag).unwrap();
        assert_eq!(unit["action"], "arm_guess_flag");
    }

    #[test]
    fn test_round_phase_json_shape() {
        let json = serde_json::to_value(RoundPhase::RoundEnded(PlayerSlot::One)).unwrap();
        assert_eq!(json["phase"], "round_ended");
        assert_eq!(json["slot"], "One");
        let back: RoundPhase = serde_json::from_value(json).unwrap();
        assert_eq!(back, RoundPhase::RoundEnded(PlayerSlot::One));
    }
}
