//! Room directory for Guessduel.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns one
//! [`Match`](guessduel_engine::Match). Commands arrive over a bounded
//! channel and are processed one at a time to completion, so a room never
//! sees interleaved calls. Rooms share nothing with each other.
//!
//! # Key types
//!
//! - [`RoomRepository`] — creates/destroys rooms, hands out handles
//! - [`RoomHandle`] — async call surface of a running room actor
//! - [`RoomError`] — unknown room, dead actor, or engine refusal

mod error;
mod manager;
mod room;

pub use error::RoomError;
pub use manager::{DEFAULT_CHANNEL_SIZE, RoomRepository};
pub use room::RoomHandle;
