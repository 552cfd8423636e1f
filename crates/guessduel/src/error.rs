//! Unified error type for Guessduel.

use guessduel_engine::EngineError;
use guessduel_protocol::ProtocolError;
use guessduel_room::RoomError;
use guessduel_session::SeatError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DuelError {
    /// Bytes that are not a valid request.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The rules engine refused a call.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Unknown or unreachable room.
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Bad seat token or a seat that is already held.
    #[error(transparent)]
    Seat(#[from] SeatError),

    /// A service configuration that cannot be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DuelError {
    /// HTTP-style status code reported in [`Response::Error`](guessduel_protocol::Response::Error).
    pub fn code(&self) -> u16 {
        match self {
            Self::Protocol(_) | Self::Config(_) => 400,
            Self::Engine(err) | Self::Room(RoomError::Engine(err)) => engine_code(err),
            Self::Room(RoomError::NotFound(_)) => 404,
            Self::Room(RoomError::Unavailable(_)) => 503,
            Self::Seat(SeatError::InvalidToken) => 401,
            Self::Seat(SeatError::SeatTaken(..)) => 409,
        }
    }
}

fn engine_code(err: &EngineError) -> u16 {
    match err {
        EngineError::Validation(_) => 400,
        EngineError::IllegalAction(_) | EngineError::InvalidPhase(_) => 409,
    }
}
