//! Rules engine for Guessduel, a two-player number-guessing duel.
//!
//! Each player hides a secret number; players take turns guessing the
//! opponent's secret, asking for arithmetic hints against a hidden number,
//! and playing tactical mechanics (traps, bluffs, guess-flags, digit
//! declarations, roles) that are switched on per room.
//!
//! [`Match`] is the only entry point that mutates state:
//!
//! ```text
//! join_secret ×2 ─▶ apply / resolve_decision … ─▶ RoundEnd
//!                       ▲                          │
//!                       └── next_round ◀── finish_round ──▶ finish_match
//! ```
//!
//! ```
//! use guessduel_engine::{Match, MatchConfig};
//! use guessduel_protocol::{Action, Directive, PlayerSlot};
//!
//! let mut duel = Match::with_seed(MatchConfig { target_points: 1, ..MatchConfig::default() }, 7)?;
//! duel.join_secret(PlayerSlot::One, "Ada", 10)?;
//! duel.join_secret(PlayerSlot::Two, "Bo", 20)?;
//!
//! let directive = duel.apply(PlayerSlot::One, Action::Guess { value: 20 })?;
//! assert_eq!(directive, Directive::RoundEnd { winner: PlayerSlot::One });
//! assert!(duel.finish_round()?.match_over);
//! # Ok::<(), guessduel_engine::EngineError>(())
//! ```

mod config;
mod error;
mod game;
mod lifecycle;
mod log;
mod player;
mod resolver;
pub mod rules;
mod state;
mod visibility;

pub use config::{MatchConfig, RuleToggles};
pub use error::{EngineError, IllegalAction};
pub use game::Match;
pub use log::{ActionLog, EntryKind, LogEntry};
pub use player::{Declaration, GuessFlag, PerPlayerRoundState, ViewGrant};
pub use rules::NumberRange;
pub use state::{HintSource, PendingDecision, Prompt, RoomState};
