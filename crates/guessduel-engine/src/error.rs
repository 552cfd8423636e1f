//! Error types for the engine.
//!
//! Every error is recoverable and is returned before the room is touched:
//! a rejected call leaves the `RoomState` exactly as it was, so a
//! duplicated or stale request from the transport can simply be dropped.

use guessduel_protocol::{DecisionKind, PlayerSlot, RoundPhase};

/// Errors returned by [`Match`](crate::Match) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A value is out of range or a parameter is malformed.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The action is not allowed right now.
    #[error(transparent)]
    IllegalAction(#[from] IllegalAction),

    /// The call does not belong to the current lifecycle phase, e.g.
    /// acting before both secrets are in.
    #[error("not allowed while the match is in phase {0}")]
    InvalidPhase(RoundPhase),
}

/// Why an otherwise well-formed action was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerSlot),

    /// Only the pending sub-action (or its decline) is accepted.
    #[error("a {0} must be resolved first")]
    PendingSubAction(DecisionKind),

    #[error("there is no decision to make")]
    NoPendingDecision,

    /// The answer does not fit the kind of prompt that is open.
    #[error("that answer does not fit the pending {0}")]
    WrongDecision(DecisionKind),

    #[error("{0} is on cooldown")]
    OnCooldown(&'static str),

    #[error("no {0} left")]
    QuotaExhausted(&'static str),

    #[error("{0} already used")]
    AlreadyUsed(&'static str),

    #[error("{0} is disabled in this room")]
    RuleDisabled(&'static str),

    #[error("there is no open declaration to challenge")]
    NothingToChallenge,

    #[error("{0} has already submitted a secret")]
    SecretAlreadySet(PlayerSlot),
}
