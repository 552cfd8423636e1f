//! Request and response envelopes.
//!
//! A presentation layer that cannot link the engine directly (a separate
//! web process, a test harness, a bot) talks to a room by encoding a
//! [`Request`] with a [`Codec`](crate::Codec) and decoding the
//! [`Response`] it gets back.

use serde::{Deserialize, Serialize};

use crate::{Action, Decision, Directive, MatchSummary, PlayerView, RoundSummary};

/// Something a seated player asks of their room.
///
/// Internally tagged: `{ "type": "Act", "action": { "action": "guess", "value": 3 } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Submit a display name and secret for the upcoming round.
    JoinSecret { name: String, secret: i32 },
    Act { action: Action },
    Decide { decision: Decision },
    /// Fetch the caller's filtered view.
    View,
    FinishRound,
    NextRound,
    FinishMatch,
}

/// The room's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Secret accepted; `round_started` is true once both are in.
    Joined { round_started: bool },
    Directive { directive: Directive },
    View { view: Box<PlayerView> },
    RoundSummary { summary: Box<RoundSummary> },
    MatchSummary { summary: MatchSummary },
    /// `code` follows HTTP conventions: 400 malformed or out of range,
    /// 401 unknown seat, 404 unknown room, 409 illegal in the current
    /// state, 503 room unavailable.
    Error { code: u16, message: String },
}

impl Response {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
