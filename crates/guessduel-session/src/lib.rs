//! Seat binding for Guessduel.
//!
//! A duel has no accounts: whoever holds a seat token *is* that player.
//! [`SeatRegistry`] hands out one random token per `(room, slot)` pair and
//! resolves tokens back to seats on every request. Releasing a room
//! invalidates all of its tokens.

mod error;
mod registry;

pub use error::SeatError;
pub use registry::{Seat, SeatRegistry};
