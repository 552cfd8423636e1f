//! Shared vocabulary for Guessduel.
//!
//! - **Types** ([`PlayerSlot`], [`Action`], [`Decision`], [`Directive`],
//!   [`RoundPhase`], …) — the words the engine and its callers share.
//! - **Views** ([`PlayerView`], [`RoundSummary`], [`MatchSummary`]) —
//!   per-viewer snapshots handed to the presentation layer.
//! - **Envelopes** ([`Request`], [`Response`]) — what a remote caller
//!   sends to a room and gets back.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how envelopes become bytes.
//!
//! ```text
//! presentation (bytes) → Codec → Request → room → engine
//! ```

mod codec;
mod envelope;
mod error;
mod types;
mod view;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use envelope::{Request, Response};
pub use error::ProtocolError;
pub use types::{
    Action, Decision, DecisionKind, Directive, HintKind, HintReading, PlayerSlot, Predicate,
    Role, RoomId, RoundPhase,
};
pub use view::{GrantStatus, MatchSummary, OwnResources, PlayerView, PromptView, RoundSummary};
