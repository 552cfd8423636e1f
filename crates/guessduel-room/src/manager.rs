//! Room repository: creates, tracks, and tears down rooms.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use guessduel_engine::{Match, MatchConfig};
use guessduel_protocol::RoomId;

use crate::room::spawn_room;
use crate::{RoomError, RoomHandle};

/// Counter for generating unique room IDs.
static NEXT_ROOM_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for room actors.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Owns the mapping from room id to running room actor.
///
/// There is no process-wide room table: whoever needs rooms holds a
/// repository (usually behind a lock in a service).
#[derive(Debug)]
pub struct RoomRepository {
    rooms: HashMap<RoomId, RoomHandle>,
    channel_size: usize,
}

impl RoomRepository {
    /// Creates an empty repository whose rooms use the default channel size.
    pub fn new() -> Self {
        Self::with_channel_size(DEFAULT_CHANNEL_SIZE)
    }

    pub fn with_channel_size(channel_size: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            channel_size: channel_size.max(1),
        }
    }

    /// Creates a room with an OS-seeded random source.
    ///
    /// # Errors
    /// Returns [`RoomError::Engine`] if `config` is invalid.
    pub fn create_room(&mut self, config: MatchConfig) -> Result<RoomId, RoomError> {
        let game = Match::new(config)?;
        Ok(self.insert(game))
    }

    /// Creates a room whose hidden numbers and draws follow `seed`.
    pub fn create_seeded_room(
        &mut self,
        config: MatchConfig,
        seed: u64,
    ) -> Result<RoomId, RoomError> {
        let game = Match::with_seed(config, seed)?;
        Ok(self.insert(game))
    }

    fn insert(&mut self, game: Match) -> RoomId {
        let room_id = RoomId(NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed));
        let target = game.config().target_points;
        let handle = spawn_room(room_id, game, self.channel_size);
        self.rooms.insert(room_id, handle);
        tracing::info!(%room_id, target, "room created");
        room_id
    }

    /// Returns a cloned handle, so callers can await room calls without
    /// holding the repository.
    pub fn handle(&self, room_id: RoomId) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(&room_id)
            .cloned()
            .ok_or(RoomError::NotFound(room_id))
    }

    /// Shuts down a room and forgets it.
    pub async fn destroy_room(&mut self, room_id: RoomId) -> Result<(), RoomError> {
        let handle = self
            .rooms
            .remove(&room_id)
            .ok_or(RoomError::NotFound(room_id))?;

        let _ = handle.shutdown().await;

        tracing::info!(%room_id, "room destroyed");
        Ok(())
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all active room IDs.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }
}

impl Default for RoomRepository {
    fn default() -> Self {
        Self::new()
    }
}
