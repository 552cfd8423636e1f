//! The complete state of one room.

use guessduel_protocol::{DecisionKind, HintKind, HintReading, PlayerSlot, Role, RoundPhase};
use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::log::ActionLog;
use crate::player::PerPlayerRoundState;

/// Where a hint preview came from, and what committing it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintSource {
    /// The opponent's staged bluff.
    Bluff,
    /// A real reading, not yet charged to the requester.
    Genuine { used_choice: bool, from_stock: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    Hint {
        preview: HintReading,
        source: HintSource,
        /// Kind the requester asked for, reused if an accusation pays out.
        requested: Option<HintKind>,
    },
    Devotion {
        options: Vec<Role>,
    },
    FreeGuess,
    SuddenPress,
}

impl Prompt {
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::Hint { .. } => DecisionKind::HintBluff,
            Self::Devotion { .. } => DecisionKind::Devotion,
            Self::FreeGuess => DecisionKind::FreeGuess,
            Self::SuddenPress => DecisionKind::SuddenPress,
        }
    }
}

/// A prompt the turn holder must answer before anything else happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub owner: PlayerSlot,
    pub prompt: Prompt,
}

/// Everything the engine knows about a room.
///
/// Fields are public for inspection; mutation goes through
/// [`Match`](crate::Match) so that every invariant is checked in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    pub config: MatchConfig,
    pub names: [String; 2],
    pub score: [u32; 2],
    pub round_no: u32,
    /// Acts first this round. The previous round's loser.
    pub starter: PlayerSlot,
    pub turn: PlayerSlot,
    pub phase: RoundPhase,
    pub secrets: [Option<i32>; 2],
    pub hidden_number: Option<i32>,
    pub tries: [u32; 2],
    pub players: [PerPlayerRoundState; 2],
    pub log: ActionLog,
    pub winner: Option<PlayerSlot>,
    pub pending: Option<PendingDecision>,
}

impl RoomState {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            names: [default_name(PlayerSlot::One), default_name(PlayerSlot::Two)],
            score: [0, 0],
            round_no: 1,
            starter: PlayerSlot::One,
            turn: PlayerSlot::One,
            phase: RoundPhase::AwaitingSecret(PlayerSlot::One),
            secrets: [None, None],
            hidden_number: None,
            tries: [0, 0],
            players: [
                PerPlayerRoundState::fresh(false, Vec::new()),
                PerPlayerRoundState::fresh(false, Vec::new()),
            ],
            log: ActionLog::default(),
            winner: None,
            pending: None,
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &PerPlayerRoundState {
        &self.players[slot.index()]
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut PerPlayerRoundState {
        &mut self.players[slot.index()]
    }

    pub fn name(&self, slot: PlayerSlot) -> &str {
        &self.names[slot.index()]
    }

    pub fn secret(&self, slot: PlayerSlot) -> Option<i32> {
        self.secrets[slot.index()]
    }

    /// The open prompt, if any.
    pub fn pending_kind(&self) -> Option<DecisionKind> {
        self.pending.as_ref().map(|p| p.prompt.kind())
    }
}

pub(crate) fn default_name(slot: PlayerSlot) -> String {
    format!("Player {}", slot.number())
}
