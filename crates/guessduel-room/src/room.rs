//! Room actor: an isolated Tokio task that owns one match.
//!
//! The outside world talks to it only through a [`RoomHandle`]. Every
//! command carries a oneshot reply channel, and the actor answers each
//! one before it reads the next, which is what serializes calls per room.

use guessduel_engine::{EngineError, Match, RoomState};
use guessduel_protocol::{
    Action, Decision, Directive, MatchSummary, PlayerSlot, PlayerView, RoomId, RoundSummary,
};
use tokio::sync::{mpsc, oneshot};

use crate::RoomError;

type Reply<T> = oneshot::Sender<Result<T, EngineError>>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    JoinSecret {
        slot: PlayerSlot,
        name: String,
        secret: i32,
        reply: Reply<bool>,
    },
    Apply {
        slot: PlayerSlot,
        action: Action,
        reply: Reply<Directive>,
    },
    Decide {
        slot: PlayerSlot,
        decision: Decision,
        reply: Reply<Directive>,
    },
    /// Per-viewer snapshot. Drains the viewer's notices.
    View {
        slot: PlayerSlot,
        reply: oneshot::Sender<PlayerView>,
    },
    VisibleLog {
        slot: PlayerSlot,
        reply: oneshot::Sender<Vec<String>>,
    },
    /// Unfiltered copy of the room state, for hosts and tests.
    Snapshot {
        reply: oneshot::Sender<RoomState>,
    },
    FinishRound {
        reply: Reply<RoundSummary>,
    },
    NextRound {
        reply: Reply<()>,
    },
    FinishMatch {
        reply: Reply<MatchSummary>,
    },
    Shutdown,
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone: it is an `mpsc::Sender` plus the room id.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Sends `command` and waits for the actor's reply.
    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> RoomCommand,
    ) -> Result<T, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Submits a display name and secret. `Ok(true)` means the round
    /// has started.
    pub async fn join_secret(
        &self,
        slot: PlayerSlot,
        name: impl Into<String>,
        secret: i32,
    ) -> Result<bool, RoomError> {
        let name = name.into();
        let started = self
            .request(|reply| RoomCommand::JoinSecret {
                slot,
                name,
                secret,
                reply,
            })
            .await??;
        Ok(started)
    }

    pub async fn apply(&self, slot: PlayerSlot, action: Action) -> Result<Directive, RoomError> {
        let directive = self
            .request(|reply| RoomCommand::Apply {
                slot,
                action,
                reply,
            })
            .await??;
        Ok(directive)
    }

    pub async fn resolve_decision(
        &self,
        slot: PlayerSlot,
        decision: Decision,
    ) -> Result<Directive, RoomError> {
        let directive = self
            .request(|reply| RoomCommand::Decide {
                slot,
                decision,
                reply,
            })
            .await??;
        Ok(directive)
    }

    /// Fetches `slot`'s view. Notices in the view are shown once.
    pub async fn view(&self, slot: PlayerSlot) -> Result<PlayerView, RoomError> {
        self.request(|reply| RoomCommand::View { slot, reply }).await
    }

    pub async fn visible_log(&self, slot: PlayerSlot) -> Result<Vec<String>, RoomError> {
        self.request(|reply| RoomCommand::VisibleLog { slot, reply })
            .await
    }

    /// Copies the whole room state, secrets included. Never hand this to
    /// a player.
    pub async fn snapshot(&self) -> Result<RoomState, RoomError> {
        self.request(|reply| RoomCommand::Snapshot { reply }).await
    }

    pub async fn finish_round(&self) -> Result<RoundSummary, RoomError> {
        let summary = self
            .request(|reply| RoomCommand::FinishRound { reply })
            .await??;
        Ok(summary)
    }

    pub async fn next_round(&self) -> Result<(), RoomError> {
        self.request(|reply| RoomCommand::NextRound { reply })
            .await??;
        Ok(())
    }

    pub async fn finish_match(&self) -> Result<MatchSummary, RoomError> {
        let summary = self
            .request(|reply| RoomCommand::FinishMatch { reply })
            .await??;
        Ok(summary)
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    game: Match,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::JoinSecret {
                    slot,
                    name,
                    secret,
                    reply,
                } => {
                    let result = self.game.join_secret(slot, &name, secret);
                    if let Ok(true) = result {
                        tracing::info!(
                            room_id = %self.room_id,
                            round = self.game.state().round_no,
                            "round started"
                        );
                    }
                    let _ = reply.send(self.traced(slot, result));
                }
                RoomCommand::Apply {
                    slot,
                    action,
                    reply,
                } => {
                    tracing::debug!(
                        room_id = %self.room_id,
                        player = %slot,
                        action = action.name(),
                        "action received"
                    );
                    let result = self.game.apply(slot, action);
                    let _ = reply.send(self.traced(slot, result));
                }
                RoomCommand::Decide {
                    slot,
                    decision,
                    reply,
                } => {
                    let result = self.game.resolve_decision(slot, decision);
                    let _ = reply.send(self.traced(slot, result));
                }
                RoomCommand::View { slot, reply } => {
                    let view = self.game.view(slot);
                    self.game.take_notices(slot);
                    let _ = reply.send(view);
                }
                RoomCommand::VisibleLog { slot, reply } => {
                    let _ = reply.send(self.game.visible_log(slot));
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.game.state().clone());
                }
                RoomCommand::FinishRound { reply } => {
                    let _ = reply.send(self.game.finish_round());
                }
                RoomCommand::NextRound { reply } => {
                    let _ = reply.send(self.game.next_round());
                }
                RoomCommand::FinishMatch { reply } => {
                    let result = self.game.finish_match();
                    if let Ok(summary) = &result {
                        tracing::info!(
                            room_id = %self.room_id,
                            champion = %summary.champion,
                            "match ended"
                        );
                    }
                    let _ = reply.send(result);
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room_id = %self.room_id, "room shutting down");
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    fn traced<T>(&self, slot: PlayerSlot, result: Result<T, EngineError>) -> Result<T, EngineError> {
        if let Err(reason) = &result {
            tracing::debug!(
                room_id = %self.room_id,
                player = %slot,
                %reason,
                "call rejected"
            );
        }
        result
    }
}

/// Spawns a new room actor task and returns a handle to communicate with it.
///
/// `channel_size` controls backpressure: once the channel is full,
/// senders wait.
pub(crate) fn spawn_room(room_id: RoomId, game: Match, channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id,
        game,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
