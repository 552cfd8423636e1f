use guessduel_protocol::{Directive, PlayerSlot};
use tracing::debug;

use super::TurnResolver;
use crate::error::EngineError;
use crate::player::{GuessFlag, ViewGrant};
use crate::rules::{KILL_RADIUS, NEAR_RADIUS, SUDDEN_PRESS_PENALTY};
use crate::state::{PendingDecision, Prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GuessMode {
    Normal,
    /// The sudden-press follow-up after a miss.
    FollowUp,
    /// Awarded for catching a false declaration. Ignores cooldown and
    /// guess-flags.
    Free,
}

impl TurnResolver<'_> {
    /// Evaluates a guess. First match wins: guess-flag, correct, kill trap,
    /// info trap (not terminal), near kill trap, miss.
    pub(super) fn guess(
        &mut self,
        actor: PlayerSlot,
        value: i32,
        mode: GuessMode,
    ) -> Result<Directive, EngineError> {
        let range = self.state.config.secret_range();
        if !range.contains(value) {
            return Err(EngineError::Validation(format!(
                "guess {value} is outside {}..={}",
                range.min, range.max
            )));
        }
        let target = self.opponent_secret(actor)?;
        let name = self.state.name(actor).to_owned();

        let cooldown = self.state.player(actor).guess_cooldown;
        if mode == GuessMode::Normal && cooldown > 0 {
            self.state.log.guess(
                actor,
                format!("{name} tried to guess, but guessing is on cooldown for {cooldown} more turn(s)."),
            );
            return Ok(self.pass_turn());
        }

        self.state.pending = None;
        if mode == GuessMode::FollowUp {
            self.state.player_mut(actor).guess_penalty = SUDDEN_PRESS_PENALTY;
        }
        self.state.tries[actor.index()] += 1;

        let opponent = actor.other();
        let opponent_name = self.state.name(opponent).to_owned();

        if mode != GuessMode::Free && self.state.player(opponent).guess_flag == GuessFlag::Armed {
            self.state.player_mut(opponent).guess_flag = GuessFlag::Spent;
            self.state.log.guess(
                actor,
                format!("{name} guesses {value} and runs into {opponent_name}'s guess-flag."),
            );
            return Ok(self.end_round(opponent));
        }

        if value == target {
            self.state
                .log
                .guess(actor, format!("{name} guesses {value}: correct!"));
            return Ok(self.end_round(actor));
        }

        let mut trap_note = "";
        if self.state.config.rules.traps {
            let kill_distance = self
                .state
                .player(opponent)
                .kill_trap
                .map(|trap| (value - trap).abs());

            if kill_distance.is_some_and(|d| d <= KILL_RADIUS) {
                self.state.log.guess(
                    actor,
                    format!("{name} guesses {value} and springs {opponent_name}'s kill trap."),
                );
                return Ok(self.end_round(opponent));
            }

            let cutoff = self.state.log.len();
            let owner = self.state.player_mut(opponent);
            if owner.info_traps.contains(&value) {
                if owner.grant == ViewGrant::None {
                    owner.grant = ViewGrant::Pending { cutoff };
                }
                trap_note = " An info trap goes off.";
                debug!(owner = %opponent, value, "info trap triggered");
            }

            if kill_distance.is_some_and(|d| d <= NEAR_RADIUS) {
                self.state.log.guess(
                    actor,
                    format!("{name} guesses {value}: miss, close to a kill trap.{trap_note}"),
                );
                self.assign_skip(actor);
                return Ok(self.pass_turn());
            }
        }

        self.state
            .log
            .guess(actor, format!("{name} guesses {value}: miss.{trap_note}"));

        let press_enabled = self.state.config.rules.sudden_press;
        let me = self.state.player_mut(actor);
        if mode == GuessMode::Normal && press_enabled && !me.sudden_press_used {
            me.sudden_press_used = true;
            self.state.pending = Some(PendingDecision {
                owner: actor,
                prompt: Prompt::SuddenPress,
            });
            return Ok(Directive::Continue);
        }

        let penalty = std::mem::take(&mut me.guess_penalty);
        Ok(self.pass_turn_charging(|me| {
            me.guess_cooldown = me.guess_cooldown.max(penalty);
        }))
    }
}
