use guessduel_protocol::{DecisionKind, Directive, HintKind, HintReading, PlayerSlot, Role};
use rand::Rng;
use rand::seq::IndexedRandom;

use super::TurnResolver;
use crate::error::{EngineError, IllegalAction};
use crate::rules::{ACCUSE_PENALTY, ACCUSE_PENALTY_TRICKSTER};
use crate::state::{HintSource, PendingDecision, Prompt};

impl TurnResolver<'_> {
    pub(super) fn hint(
        &mut self,
        actor: PlayerSlot,
        choose: Option<HintKind>,
    ) -> Result<Directive, EngineError> {
        if self.state.player(actor).hint_cooldown > 0 {
            return Err(IllegalAction::OnCooldown("hint").into());
        }
        let opponent_secret = self.opponent_secret(actor)?;
        let hidden = self
            .state
            .hidden_number
            .ok_or(EngineError::InvalidPhase(self.state.phase))?;

        if !self.state.config.rules.bluff {
            let (reading, source) = self.draw_hint(actor, choose, opponent_secret, hidden);
            self.commit_hint(actor, reading, source);
            return Ok(self.finish_hint_turn());
        }

        let (preview, source) = match self.state.player(actor.other()).bluff {
            Some(bluff) => (bluff, HintSource::Bluff),
            None => self.draw_hint(actor, choose, opponent_secret, hidden),
        };
        self.state.pending = Some(PendingDecision {
            owner: actor,
            prompt: Prompt::Hint {
                preview,
                source,
                requested: choose,
            },
        });
        Ok(Directive::AwaitDecision {
            kind: DecisionKind::HintBluff,
        })
    }

    pub(super) fn believe_hint(
        &mut self,
        actor: PlayerSlot,
        preview: HintReading,
        source: HintSource,
    ) -> Directive {
        match source {
            HintSource::Bluff => {
                self.state.player_mut(actor.other()).bluff = None;
                let text = format!("{} takes a hint: {preview}", self.state.name(actor));
                self.state.log.action(actor, text);
            }
            HintSource::Genuine { .. } => self.commit_hint(actor, preview, source),
        }
        self.finish_hint_turn()
    }

    pub(super) fn accuse_hint(
        &mut self,
        actor: PlayerSlot,
        source: HintSource,
        requested: Option<HintKind>,
    ) -> Directive {
        let name = self.state.name(actor).to_owned();
        match source {
            HintSource::Bluff => {
                self.state.player_mut(actor.other()).bluff = None;
                self.state
                    .log
                    .action(actor, format!("{name} calls the bluff and earns two real hints."));
                // Both secrets are set while in play.
                if let (Some(secret), Some(hidden)) =
                    (self.state.secret(actor.other()), self.state.hidden_number)
                {
                    let mut choose = requested;
                    for _ in 0..2 {
                        let (reading, source) = self.draw_hint(actor, choose.take(), secret, hidden);
                        self.commit_hint(actor, reading, source);
                    }
                }
                self.finish_hint_turn()
            }
            HintSource::Genuine { .. } => {
                let penalty = if self.state.player(actor.other()).has_role(Role::Trickster) {
                    ACCUSE_PENALTY_TRICKSTER
                } else {
                    ACCUSE_PENALTY
                };
                self.state.player_mut(actor).hint_penalty = penalty;
                self.state.log.action(
                    actor,
                    format!("{name} accuses an honest hint. Hints now cost {penalty} turn(s) of cooldown."),
                );
                self.pass_turn()
            }
        }
    }

    /// Picks a hint kind and computes its reading without charging the
    /// requester for it.
    fn draw_hint(
        &mut self,
        actor: PlayerSlot,
        choose: Option<HintKind>,
        opponent_secret: i32,
        hidden: i32,
    ) -> (HintReading, HintSource) {
        let me = self.state.player(actor);
        let (kind, source) = match choose {
            Some(kind) if me.can_choose_hint() => (
                kind,
                HintSource::Genuine {
                    used_choice: true,
                    from_stock: false,
                },
            ),
            _ => match me.hint_stock.choose(self.rng) {
                Some(kind) => (
                    *kind,
                    HintSource::Genuine {
                        used_choice: false,
                        from_stock: true,
                    },
                ),
                None => (
                    *HintKind::ALL.choose(self.rng).unwrap_or(&HintKind::Sum),
                    HintSource::Genuine {
                        used_choice: false,
                        from_stock: false,
                    },
                ),
            },
        };

        let mut value = kind.compute(opponent_secret, hidden);
        if self.state.player(actor.other()).has_role(Role::Trickster) {
            value += if self.rng.random_bool(0.5) { 1 } else { -1 };
        }
        (HintReading { kind, value }, source)
    }

    /// Charges a genuine reading to the requester and logs it.
    fn commit_hint(&mut self, actor: PlayerSlot, reading: HintReading, source: HintSource) {
        let me = self.state.player_mut(actor);
        if let HintSource::Genuine {
            used_choice,
            from_stock,
        } = source
        {
            if used_choice && !me.has_role(Role::Scholar) {
                me.may_choose_hint = false;
            }
            if from_stock {
                if let Some(pos) = me.hint_stock.iter().position(|k| *k == reading.kind) {
                    me.hint_stock.remove(pos);
                }
            }
        }
        let text = format!("{} takes a hint: {reading}", self.state.name(actor));
        self.state.log.action(actor, text);
    }

    fn finish_hint_turn(&mut self) -> Directive {
        self.pass_turn_charging(|me| {
            me.hint_cooldown = if me.has_role(Role::Scholar) {
                0
            } else {
                me.hint_penalty
            };
        })
    }
}
