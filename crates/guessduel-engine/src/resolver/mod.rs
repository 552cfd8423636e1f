//! Action resolution for the player whose turn it is.
//!
//! `TurnResolver` borrows the room and its random source for the length
//! of one call. Every handler validates first and mutates second, so an
//! `Err` leaves the room untouched.
//!
//! Turn hand-off always goes through `pass_turn`, which counts down the
//! outgoing player's cooldowns and then runs the incoming player's
//! turn-start effects (grant promotion, guess-flag expiry, skips,
//! Disarmer) before reporting whose turn it ends up being.
//!
//! A cooldown of N blocks its owner's next N own turns. Counters only
//! move when their owner finishes a turn, and charges made as a turn
//! ends are applied after that countdown.

mod guess;
mod hint;
mod tactics;
mod traps;


use guessduel_protocol::{
    Action, Decision, DecisionKind, Directive, HintReading, PlayerSlot, Role, RoundPhase,
};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::error::{EngineError, IllegalAction};
use crate::player::{GuessFlag, PerPlayerRoundState, ViewGrant};
use crate::state::{Prompt, RoomState};

use guess::GuessMode;

pub(crate) struct TurnResolver<'a> {
    state: &'a mut RoomState,
    rng: &'a mut StdRng,
}

impl<'a> TurnResolver<'a> {
    pub(crate) fn new(state: &'a mut RoomState, rng: &'a mut StdRng) -> Self {
        Self { state, rng }
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    pub(crate) fn apply(
        &mut self,
        actor: PlayerSlot,
        action: Action,
    ) -> Result<Directive, EngineError> {
        self.check_turn(actor)?;
        debug!(player = %actor, action = action.name(), "applying action");

        match (self.state.pending_kind(), action) {
            (Some(DecisionKind::SuddenPress), Action::Guess { value }) => {
                self.guess(actor, value, GuessMode::FollowUp)
            }
            (Some(DecisionKind::FreeGuess), Action::Guess { value }) => {
                self.guess(actor, value, GuessMode::Free)
            }
            (Some(kind @ (DecisionKind::SuddenPress | DecisionKind::FreeGuess)), Action::Decline) => {
                Ok(self.decline(actor, kind))
            }
            (Some(kind), _) => Err(IllegalAction::PendingSubAction(kind).into()),
            (None, Action::Decline) => Err(IllegalAction::NoPendingDecision.into()),
            (None, Action::Guess { value }) => self.guess(actor, value, GuessMode::Normal),
            (None, Action::Hint { choose }) => self.hint(actor, choose),
            (None, Action::ChangeSecret { value }) => self.change_secret(actor, value),
            (None, Action::SetKillTrap { value }) => self.set_kill_trap(actor, value),
            (None, Action::SetInfoTraps { values, bulk }) => {
                self.set_info_traps(actor, &values, bulk)
            }
            (None, Action::SetBluff { kind, value }) => {
                self.set_bluff(actor, HintReading { kind, value })
            }
            (None, Action::ArmGuessFlag) => self.arm_guess_flag(actor),
            (None, Action::DeclareLastDigit { digit }) => self.declare_digit(actor, digit),
            (None, Action::ChallengeDeclaration) => self.challenge_declaration(actor),
            (None, Action::Devote) => self.devote(actor),
            (None, Action::YesNo { predicate }) => self.yes_no(actor, predicate),
        }
    }

    pub(crate) fn resolve_decision(
        &mut self,
        actor: PlayerSlot,
        decision: Decision,
    ) -> Result<Directive, EngineError> {
        self.check_turn(actor)?;
        let prompt = match &self.state.pending {
            Some(pending) if pending.owner == actor => pending.prompt.clone(),
            _ => return Err(IllegalAction::NoPendingDecision.into()),
        };
        debug!(player = %actor, ?decision, "resolving decision");

        match (prompt, decision) {
            (Prompt::Hint { preview, source, .. }, Decision::Believe) => {
                Ok(self.believe_hint(actor, preview, source))
            }
            (
                Prompt::Hint {
                    source, requested, ..
                },
                Decision::Accuse,
            ) => Ok(self.accuse_hint(actor, source, requested)),
            (Prompt::Devotion { options }, Decision::PickRole { role }) => {
                self.pick_role(actor, &options, role)
            }
            (prompt, _) => Err(IllegalAction::WrongDecision(prompt.kind()).into()),
        }
    }

    fn check_turn(&self, actor: PlayerSlot) -> Result<(), EngineError> {
        if self.state.phase != RoundPhase::InPlay {
            return Err(EngineError::InvalidPhase(self.state.phase));
        }
        if self.state.turn != actor {
            return Err(IllegalAction::NotYourTurn(actor).into());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Turn machinery
    // -----------------------------------------------------------------------

    /// Ends the current turn and hands control to the other player.
    fn pass_turn(&mut self) -> Directive {
        self.pass_turn_charging(|_| {})
    }

    /// Like [`pass_turn`](Self::pass_turn), but `charge` sets the outgoing
    /// player's cooldowns after their own countdown, so whatever it writes
    /// is still in force on their next turn.
    fn pass_turn_charging(&mut self, charge: impl FnOnce(&mut PerPlayerRoundState)) -> Directive {
        self.state.pending = None;
        let outgoing = self.state.turn;
        let me = self.state.player_mut(outgoing);
        me.tick_cooldowns();
        charge(me);

        self.begin_turn(outgoing.other());
        Directive::Switch {
            next: self.state.turn,
        }
    }

    /// Runs the turn-start effects for `slot`. A skipped turn recurses
    /// into the other player's turn start.
    pub(crate) fn begin_turn(&mut self, slot: PlayerSlot) {
        self.state.turn = slot;
        let me = self.state.player_mut(slot);
        me.free_info_used = 0;
        me.yes_no_this_turn = false;
        if let ViewGrant::Pending { cutoff } = me.grant {
            me.grant = ViewGrant::Active { cutoff };
            me.notices
                .push("Your info trap paid off: your opponent's moves are now visible.".into());
        }
        if me.guess_flag == GuessFlag::Armed {
            me.guess_flag = GuessFlag::Spent;
            me.notices
                .push("Your guess-flag expired without catching a guess.".into());
        }
        if me.skip_next_turn {
            me.skip_next_turn = false;
            let text = format!("{} loses a turn.", self.state.name(slot));
            self.state.log.system(text);
            debug!(player = %slot, "turn skipped");
            self.begin_turn(slot.other());
            return;
        }

        self.run_disarmer(slot);
    }

    fn run_disarmer(&mut self, slot: PlayerSlot) {
        let opponent = slot.other();
        let me = self.state.player(slot);
        let target_len = self.state.player(opponent).info_traps.len();
        if !me.has_role(Role::Disarmer) || me.disarmer_spent || target_len == 0 {
            return;
        }

        let index = self.rng.random_range(0..target_len);
        let removed = self.state.player_mut(opponent).info_traps.remove(index);
        self.state.player_mut(slot).disarmer_spent = true;
        let text = format!(
            "Disarmer: {}'s info trap at {removed} is removed.",
            self.state.name(opponent)
        );
        self.state.log.action(slot, text);
    }

    /// Sets `slot` to lose their next turn unless an unspent Guardian
    /// absorbs it.
    fn assign_skip(&mut self, slot: PlayerSlot) {
        let player = self.state.player_mut(slot);
        if player.has_role(Role::Guardian) && !player.guardian_spent {
            player.guardian_spent = true;
            let text = format!("Guardian shields {} from a lost turn.", self.state.name(slot));
            self.state.log.action(slot, text);
        } else {
            player.skip_next_turn = true;
        }
    }

    fn end_round(&mut self, winner: PlayerSlot) -> Directive {
        self.state.winner = Some(winner);
        self.state.phase = RoundPhase::RoundEnded(winner);
        self.state.pending = None;
        let text = format!(
            "{} wins round {}.",
            self.state.name(winner),
            self.state.round_no
        );
        self.state.log.system(text);
        info!(
            round = self.state.round_no,
            %winner,
            tries = self.state.tries[winner.index()],
            "round won"
        );
        Directive::RoundEnd { winner }
    }

    fn decline(&mut self, actor: PlayerSlot, kind: DecisionKind) -> Directive {
        let name = self.state.name(actor);
        let text = match kind {
            DecisionKind::FreeGuess => format!("{name} passes on the free guess."),
            _ => format!("{name} declines the follow-up guess."),
        };
        self.state.log.action(actor, text);
        self.pass_turn()
    }

    fn ensure_rule(&self, enabled: bool, rule: &'static str) -> Result<(), EngineError> {
        if enabled {
            Ok(())
        } else {
            Err(IllegalAction::RuleDisabled(rule).into())
        }
    }

    fn opponent_secret(&self, actor: PlayerSlot) -> Result<i32, EngineError> {
        self.state
            .secret(actor.other())
            .ok_or(EngineError::InvalidPhase(self.state.phase))
    }
}
