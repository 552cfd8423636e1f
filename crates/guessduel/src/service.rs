//! `DuelService`: seat token + encoded request in, encoded response out.
//!
//! This is the entry point for a presentation layer that cannot link the
//! engine types directly. It ties together the layers:
//! codec → seat registry → room repository → room actor → engine.

use guessduel_engine::MatchConfig;
use guessduel_protocol::{Codec, JsonCodec, PlayerSlot, ProtocolError, Request, Response, RoomId};
use guessduel_room::{RoomHandle, RoomRepository};
use guessduel_session::{Seat, SeatRegistry};
use tokio::sync::Mutex;

use crate::{DuelConfig, DuelError};

/// Shared service state. Wrap it in an `Arc` to use it from many tasks.
///
/// Locks are held only long enough to look up a seat or a room handle;
/// the room call itself runs without either lock.
pub struct DuelService<C: Codec = JsonCodec> {
    rooms: Mutex<RoomRepository>,
    seats: Mutex<SeatRegistry>,
    codec: C,
    config: DuelConfig,
}

impl DuelService<JsonCodec> {
    /// Creates a service speaking JSON.
    pub fn new(config: DuelConfig) -> Self {
        Self::with_codec(config, JsonCodec)
    }
}

impl Default for DuelService<JsonCodec> {
    fn default() -> Self {
        Self::new(DuelConfig::default())
    }
}

impl<C: Codec> DuelService<C> {
    pub fn with_codec(config: DuelConfig, codec: C) -> Self {
        Self {
            rooms: Mutex::new(RoomRepository::with_channel_size(config.room_channel_size)),
            seats: Mutex::new(SeatRegistry::new()),
            codec,
            config,
        }
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Room and seat management
    // -----------------------------------------------------------------------

    /// Creates a room, using the service's default rules when `config`
    /// is `None`.
    pub async fn create_room(&self, config: Option<MatchConfig>) -> Result<RoomId, DuelError> {
        let config = config.unwrap_or_else(|| self.config.default_match.clone());
        let room_id = self.rooms.lock().await.create_room(config)?;
        Ok(room_id)
    }

    /// Like [`create_room`](Self::create_room) with a fixed random seed.
    pub async fn create_seeded_room(
        &self,
        config: Option<MatchConfig>,
        seed: u64,
    ) -> Result<RoomId, DuelError> {
        let config = config.unwrap_or_else(|| self.config.default_match.clone());
        let room_id = self.rooms.lock().await.create_seeded_room(config, seed)?;
        Ok(room_id)
    }

    /// Claims a seat in an existing room and returns its token.
    pub async fn bind_seat(&self, room_id: RoomId, slot: PlayerSlot) -> Result<String, DuelError> {
        self.rooms.lock().await.handle(room_id)?;
        let token = self.seats.lock().await.bind(room_id, slot)?;
        Ok(token)
    }

    /// Shuts a room down and invalidates its seat tokens.
    pub async fn close_room(&self, room_id: RoomId) -> Result<(), DuelError> {
        self.rooms.lock().await.destroy_room(room_id).await?;
        self.seats.lock().await.release_room(room_id);
        Ok(())
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.room_count()
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Decodes `data`, runs it for the seat behind `token`, and encodes
    /// the answer. Failures are reported inside the encoded
    /// [`Response::Error`].
    ///
    /// # Errors
    /// Only when the response itself cannot be encoded.
    pub async fn handle(&self, token: &str, data: &[u8]) -> Result<Vec<u8>, DuelError> {
        let response = match self.decode_and_dispatch(token, data).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(error = %err, code = err.code(), "request failed");
                Response::error(err.code(), err.to_string())
            }
        };
        Ok(self.codec.encode(&response)?)
    }

    async fn decode_and_dispatch(&self, token: &str, data: &[u8]) -> Result<Response, DuelError> {
        if data.is_empty() {
            return Err(ProtocolError::InvalidMessage("empty request".into()).into());
        }
        let request: Request = self.codec.decode(data)?;
        self.dispatch(token, request).await
    }

    /// Runs an already-decoded request for the seat behind `token`.
    pub async fn dispatch(&self, token: &str, request: Request) -> Result<Response, DuelError> {
        let (seat, room) = self.seat_and_room(token).await?;
        let Seat { room_id, slot } = seat;
        tracing::debug!(%room_id, player = %slot, ?request, "dispatching request");

        let response = match request {
            Request::JoinSecret { name, secret } => Response::Joined {
                round_started: room.join_secret(slot, name, secret).await?,
            },
            Request::Act { action } => Response::Directive {
                directive: room.apply(slot, action).await?,
            },
            Request::Decide { decision } => Response::Directive {
                directive: room.resolve_decision(slot, decision).await?,
            },
            Request::View => Response::View {
                view: Box::new(room.view(slot).await?),
            },
            Request::FinishRound => Response::RoundSummary {
                summary: Box::new(room.finish_round().await?),
            },
            Request::NextRound => {
                room.next_round().await?;
                Response::View {
                    view: Box::new(room.view(slot).await?),
                }
            }
            Request::FinishMatch => Response::MatchSummary {
                summary: room.finish_match().await?,
            },
        };
        Ok(response)
    }

    async fn seat_and_room(&self, token: &str) -> Result<(Seat, RoomHandle), DuelError> {
        let seat = self.seats.lock().await.resolve(token)?;
        let room = self.rooms.lock().await.handle(seat.room_id)?;
        Ok((seat, room))
    }
}
