//! The seat registry: token ↔ (room, slot).

use std::collections::HashMap;

use guessduel_protocol::{PlayerSlot, RoomId};
use rand::Rng;

use crate::SeatError;

/// A player's place at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    pub room_id: RoomId,
    pub slot: PlayerSlot,
}

/// Tracks which token holds which seat.
///
/// Two maps are kept so both directions are O(1): `tokens` answers
/// "who is this caller?", `seats` answers "is this seat free?".
#[derive(Debug, Default)]
pub struct SeatRegistry {
    tokens: HashMap<String, Seat>,
    seats: HashMap<Seat, String>,
}

impl SeatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `slot` in `room_id` and returns its token.
    ///
    /// # Errors
    /// Returns [`SeatError::SeatTaken`] if the seat already has a holder.
    pub fn bind(&mut self, room_id: RoomId, slot: PlayerSlot) -> Result<String, SeatError> {
        let seat = Seat { room_id, slot };
        if self.seats.contains_key(&seat) {
            return Err(SeatError::SeatTaken(room_id, slot));
        }

        let token = generate_token();
        self.tokens.insert(token.clone(), seat);
        self.seats.insert(seat, token.clone());
        tracing::info!(%room_id, player = %slot, "seat bound");
        Ok(token)
    }

    /// Looks up the seat a token holds.
    ///
    /// # Errors
    /// Returns [`SeatError::InvalidToken`] for unknown tokens.
    pub fn resolve(&self, token: &str) -> Result<Seat, SeatError> {
        self.tokens.get(token).copied().ok_or(SeatError::InvalidToken)
    }

    pub fn is_bound(&self, room_id: RoomId, slot: PlayerSlot) -> bool {
        self.seats.contains_key(&Seat { room_id, slot })
    }

    /// Drops every seat in `room_id`. Returns how many were released.
    pub fn release_room(&mut self, room_id: RoomId) -> usize {
        let before = self.tokens.len();
        self.tokens.retain(|_, seat| seat.room_id != room_id);
        self.seats.retain(|seat, _| seat.room_id != room_id);
        let released = before - self.tokens.len();
        if released > 0 {
            tracing::info!(%room_id, released, "seats released");
        }
        released
    }

    /// Returns the number of bound seats.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no seat is bound.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// 128 random bits as 32 lowercase hex characters.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// =========================================================================
// Tests
// =========================================================================
