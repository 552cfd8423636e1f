//! Read-only snapshots handed to the presentation layer.
//!
//! None of these types leak information a player is not entitled to:
//! the engine builds them per viewer.

use serde::{Deserialize, Serialize};

use crate::{DecisionKind, HintKind, HintReading, PlayerSlot, Role, RoundPhase};

/// State of a player's opponent-log visibility grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    #[default]
    None,
    /// Earned this turn cycle, becomes active at the holder's next turn.
    Pending,
    Active,
}

/// A prompt the viewer must answer before acting again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptView {
    pub kind: DecisionKind,
    /// Hint value shown before a believe/accuse decision.
    pub preview: Option<HintReading>,
    /// Roles on offer for a devotion pick.
    pub role_options: Vec<Role>,
}

/// Everything the viewer may see about their own resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnResources {
    pub secret: Option<i32>,
    pub guess_cooldown: u32,
    pub hint_cooldown: u32,
    pub change_cooldown: u32,
    pub changes_left: u32,
    pub hint_stock: Vec<HintKind>,
    pub may_choose_hint: bool,
    pub kill_trap: Option<i32>,
    pub info_traps: Vec<i32>,
    pub info_cap: usize,
    pub free_info_left: u32,
    pub roles: Vec<Role>,
    pub bluff: Option<HintReading>,
    pub guess_flag_armed: bool,
    pub declared_digit: Option<u8>,
    pub yes_no_left: u32,
    pub skip_next_turn: bool,
}

/// A per-player render of the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerSlot,
    pub round_no: u32,
    pub phase: RoundPhase,
    pub turn: PlayerSlot,
    pub names: [String; 2],
    pub scores: [u32; 2],
    pub target_points: u32,
    pub secret_range: (i32, i32),
    pub own: OwnResources,
    pub opponent_tries: u32,
    pub grant: GrantStatus,
    /// Whether the opponent currently reads the viewer's actions.
    pub opponent_grant: GrantStatus,
    /// The opponent's unresolved last-digit claim, open to challenge.
    pub opponent_declared_digit: Option<u8>,
    pub prompt: Option<PromptView>,
    pub notices: Vec<String>,
    pub log: Vec<String>,
}

/// Recap of a finished round. Reveals everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u32,
    pub winner: PlayerSlot,
    pub winner_name: String,
    pub winner_tries: u32,
    pub secrets: [Option<i32>; 2],
    pub hidden_number: Option<i32>,
    pub scores: [u32; 2],
    pub match_over: bool,
    pub log: Vec<String>,
}

/// Final tally of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub names: [String; 2],
    pub scores: [u32; 2],
    pub rounds_played: u32,
    pub champion: PlayerSlot,
}
