//! Error types for the room layer.

use guessduel_engine::EngineError;
use guessduel_protocol::RoomId;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// The room's engine refused the call.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
