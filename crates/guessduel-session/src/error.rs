//! Error types for the session layer.

use guessduel_protocol::{PlayerSlot, RoomId};

/// Errors raised while binding or resolving seats.
#[derive(Debug, thiserror::Error)]
pub enum SeatError {
    /// The token was never issued, or its room was released.
    #[error("invalid seat token")]
    InvalidToken,

    /// Someone already holds this seat.
    #[error("seat {1} in room {0} is already taken")]
    SeatTaken(RoomId, PlayerSlot),
}
