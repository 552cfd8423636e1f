//! [`Match`]: one room's engine instance.

use guessduel_protocol::{
    Action, Decision, Directive, MatchSummary, PlayerSlot, PlayerView, RoundPhase, RoundSummary,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::MatchConfig;
use crate::error::{EngineError, IllegalAction};
use crate::lifecycle;
use crate::resolver::TurnResolver;
use crate::state::RoomState;
use crate::visibility;

/// A match between two players: the room state and the random source that
/// drives hidden numbers, roles, hint draws and Trickster noise.
///
/// Calls are synchronous and run to completion. A call that returns `Err`
/// has not changed the match.
#[derive(Debug)]
pub struct Match {
    state: RoomState,
    rng: StdRng,
}

impl Match {
    /// Creates a match seeded from the operating system.
    pub fn new(config: MatchConfig) -> Result<Self, EngineError> {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    /// Creates a match with a deterministic random source.
    pub fn with_seed(config: MatchConfig, seed: u64) -> Result<Self, EngineError> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: MatchConfig, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            state: RoomState::new(config),
            rng,
        })
    }

    pub fn state(&self) -> &RoomState {
        &self.state
    }

    pub fn config(&self) -> &MatchConfig {
        &self.state.config
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    /// Records a player's display name and secret for the coming round.
    ///
    /// Returns `true` when this was the second secret and the round has
    /// started. A blank name keeps the current one.
    pub fn join_secret(
        &mut self,
        slot: PlayerSlot,
        name: &str,
        secret: i32,
    ) -> Result<bool, EngineError> {
        let RoundPhase::AwaitingSecret(_) = self.state.phase else {
            return Err(EngineError::InvalidPhase(self.state.phase));
        };
        if self.state.secret(slot).is_some() {
            return Err(IllegalAction::SecretAlreadySet(slot).into());
        }
        let range = self.state.config.secret_range();
        if !range.contains(secret) {
            return Err(EngineError::Validation(format!(
                "secret {secret} is outside {}..={}",
                range.min, range.max
            )));
        }

        let name = name.trim();
        if !name.is_empty() {
            self.state.names[slot.index()] = name.to_owned();
        }
        self.state.secrets[slot.index()] = Some(secret);
        debug!(player = %slot, "secret submitted");

        let missing = PlayerSlot::BOTH
            .into_iter()
            .find(|s| self.state.secret(*s).is_none());
        match missing {
            Some(missing) => {
                self.state.phase = RoundPhase::AwaitingSecret(missing);
                Ok(false)
            }
            None => {
                lifecycle::start_round(&mut self.state, &mut self.rng)?;
                Ok(true)
            }
        }
    }

    /// Applies `action` for `slot` and tells the caller what happens next.
    pub fn apply(&mut self, slot: PlayerSlot, action: Action) -> Result<Directive, EngineError> {
        let result = TurnResolver::new(&mut self.state, &mut self.rng).apply(slot, action);
        if let Err(reason) = &result {
            debug!(player = %slot, %reason, "action rejected");
        }
        result
    }

    /// Answers the prompt left open by a previous [`Match::apply`].
    pub fn resolve_decision(
        &mut self,
        slot: PlayerSlot,
        decision: Decision,
    ) -> Result<Directive, EngineError> {
        let result =
            TurnResolver::new(&mut self.state, &mut self.rng).resolve_decision(slot, decision);
        if let Err(reason) = &result {
            debug!(player = %slot, %reason, "decision rejected");
        }
        result
    }

    pub fn visible_log(&self, viewer: PlayerSlot) -> Vec<String> {
        visibility::visible_log(&self.state, viewer)
    }

    pub fn view(&self, viewer: PlayerSlot) -> PlayerView {
        visibility::player_view(&self.state, viewer)
    }

    /// Drains the one-time notices queued for `slot`.
    pub fn take_notices(&mut self, slot: PlayerSlot) -> Vec<String> {
        std::mem::take(&mut self.state.player_mut(slot).notices)
    }

    pub fn finish_round(&mut self) -> Result<RoundSummary, EngineError> {
        lifecycle::finish_round(&mut self.state)
    }

    pub fn next_round(&mut self) -> Result<(), EngineError> {
        lifecycle::next_round(&mut self.state)
    }

    pub fn finish_match(&self) -> Result<MatchSummary, EngineError> {
        lifecycle::finish_match(&self.state)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut RoomState {
        &mut self.state
    }
}
