//! # Guessduel
//!
//! A two-player number-guessing duel. Each player picks a secret; on
//! their turn they guess, ask for arithmetic hints, lay traps, bluff, or
//! make claims about their own secret. First to guess the other's secret
//! takes the round.
//!
//! This crate is the facade over the workspace:
//!
//! - [`guessduel_engine`]: the synchronous rules engine ([`Match`])
//! - [`guessduel_room`]: one Tokio actor per room
//! - [`guessduel_session`]: seat tokens
//! - [`DuelService`]: bytes in, bytes out, for any presentation layer
//!
//! ## Quick Start
//!
//! ```rust
//! use guessduel::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), DuelError> {
//! let service = DuelService::default();
//! let room = service.create_room(None).await?;
//! let ada = service.bind_seat(room, PlayerSlot::One).await?;
//!
//! let reply = service
//!     .handle(&ada, br#"{"type":"JoinSecret","name":"Ada","secret":12}"#)
//!     .await?;
//! let reply: Response = serde_json::from_slice(&reply).unwrap();
//! assert_eq!(reply, Response::Joined { round_started: false });
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod service;

pub use config::DuelConfig;
pub use error::DuelError;
pub use service::DuelService;

pub use guessduel_engine::{EngineError, IllegalAction, Match, MatchConfig, RuleToggles};
pub use guessduel_protocol as protocol;
pub use guessduel_room::{RoomError, RoomHandle, RoomRepository};
pub use guessduel_session::{Seat, SeatError, SeatRegistry};

use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Everything a host or demo usually needs.
pub mod prelude {
    pub use crate::{DuelConfig, DuelError, DuelService, init_tracing};
    pub use guessduel_engine::{Match, MatchConfig, RuleToggles};
    pub use guessduel_protocol::{
        Action, Codec, Decision, DecisionKind, Directive, HintKind, JsonCodec, MatchSummary,
        PlayerSlot, PlayerView, Predicate, Request, Response, Role, RoomId, RoundPhase,
        RoundSummary,
    };
}
