use guessduel_protocol::{DecisionKind, Directive, HintKind, PlayerSlot, Predicate, Role};
use rand::seq::SliceRandom;
use tracing::debug;

use super::TurnResolver;
use crate::error::{EngineError, IllegalAction};
use crate::player::{Declaration, GuessFlag};
use crate::rules::{
    CHANGE_COOLDOWN, DEVOTION_COOLDOWN, DEVOTION_OFFERS, YES_NO_ANALYST_COOLDOWN,
};
use crate::state::{PendingDecision, Prompt};

impl TurnResolver<'_> {
    // -----------------------------------------------------------------------
    // Secret change
    // -----------------------------------------------------------------------

    pub(super) fn change_secret(
        &mut self,
        actor: PlayerSlot,
        value: i32,
    ) -> Result<Directive, EngineError> {
        let me = self.state.player(actor);
        if me.change_cooldown > 0 {
            return Err(IllegalAction::OnCooldown("secret change").into());
        }
        if me.changes_left() == 0 {
            return Err(IllegalAction::QuotaExhausted("secret changes").into());
        }
        let range = self.state.config.secret_range();
        if !range.contains(value) {
            return Err(EngineError::Validation(format!(
                "secret {value} is outside {}..={}",
                range.min, range.max
            )));
        }
        if me.traps_collide_with(value, self.state.config.allow_negative) {
            return Err(EngineError::Validation(format!(
                "{value} collides with one of your traps"
            )));
        }

        self.state.secrets[actor.index()] = Some(value);
        let me = self.state.player_mut(actor);
        me.changes_used += 1;
        me.declaration_bonus = false;
        if let Declaration::Open { digit } = me.declaration {
            me.declaration = Declaration::Withdrawn { digit };
        }
        self.state.player_mut(actor.other()).hint_stock = HintKind::ALL.to_vec();

        let text = format!("{} changes their secret to {value}.", self.state.name(actor));
        self.state.log.action(actor, text);
        self.trim_info_traps(actor);
        Ok(self.pass_turn_charging(|me| me.change_cooldown = CHANGE_COOLDOWN))
    }

    // -----------------------------------------------------------------------
    // Guess-flag
    // -----------------------------------------------------------------------

    pub(super) fn arm_guess_flag(&mut self, actor: PlayerSlot) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.guess_flag, "guess-flag")?;
        if self.state.player(actor).guess_flag != GuessFlag::Unused {
            return Err(IllegalAction::AlreadyUsed("guess-flag").into());
        }

        self.state.player_mut(actor).guess_flag = GuessFlag::Armed;
        let text = format!("{} arms a guess-flag.", self.state.name(actor));
        self.state.log.action(actor, text);
        Ok(self.pass_turn())
    }

    // -----------------------------------------------------------------------
    // Digit declaration
    // -----------------------------------------------------------------------

    pub(super) fn declare_digit(
        &mut self,
        actor: PlayerSlot,
        digit: u8,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.digit_declaration, "digit declaration")?;
        if digit > 9 {
            return Err(EngineError::Validation(format!("{digit} is not a digit")));
        }
        if self.state.player(actor).declaration != Declaration::None {
            return Err(IllegalAction::AlreadyUsed("digit declaration").into());
        }

        let me = self.state.player_mut(actor);
        me.declaration = Declaration::Open { digit };
        me.declaration_bonus = true;
        let text = format!(
            "{} declares their secret ends in {digit}.",
            self.state.name(actor)
        );
        self.state.log.action(actor, text);
        Ok(Directive::Continue)
    }

    pub(super) fn challenge_declaration(
        &mut self,
        actor: PlayerSlot,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.digit_declaration, "digit declaration")?;
        let opponent = actor.other();
        let Some(digit) = self.state.player(opponent).open_declaration() else {
            return Err(IllegalAction::NothingToChallenge.into());
        };
        let secret = self.opponent_secret(actor)?;
        let true_digit = (secret.unsigned_abs() % 10) as u8;

        self.state.player_mut(opponent).declaration = Declaration::Resolved { digit };
        let challenger = self.state.name(actor).to_owned();
        let declarer = self.state.name(opponent).to_owned();

        if digit != true_digit {
            self.state.log.system(format!(
                "{challenger} calls {declarer}'s claim a lie: the secret ends in {true_digit}, not {digit}. {challenger} earns a free guess."
            ));
            self.state.pending = Some(PendingDecision {
                owner: actor,
                prompt: Prompt::FreeGuess,
            });
            debug!(player = %actor, "declaration exposed");
            return Ok(Directive::Continue);
        }

        self.state.log.system(format!(
            "{challenger} challenges {declarer}'s claim, but it was true."
        ));
        self.assign_skip(actor);
        Ok(self.pass_turn())
    }

    // -----------------------------------------------------------------------
    // Devotion
    // -----------------------------------------------------------------------

    pub(super) fn devote(&mut self, actor: PlayerSlot) -> Result<Directive, EngineError> {
        let rules = self.state.config.rules;
        self.ensure_rule(rules.roles && rules.devotion, "devotion")?;
        let me = self.state.player(actor);
        if me.devotion_used {
            return Err(IllegalAction::AlreadyUsed("devotion").into());
        }

        let mut options: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| !me.has_role(*role))
            .collect();
        options.shuffle(self.rng);
        options.truncate(DEVOTION_OFFERS);

        self.state.player_mut(actor).devotion_used = true;
        self.state.pending = Some(PendingDecision {
            owner: actor,
            prompt: Prompt::Devotion { options },
        });
        Ok(Directive::AwaitDecision {
            kind: DecisionKind::Devotion,
        })
    }

    pub(super) fn pick_role(
        &mut self,
        actor: PlayerSlot,
        options: &[Role],
        role: Role,
    ) -> Result<Directive, EngineError> {
        if !options.contains(&role) {
            return Err(EngineError::Validation(format!(
                "{role} is not among the offered roles"
            )));
        }

        let me = self.state.player_mut(actor);
        me.roles.push(role);
        me.devotion_penalty = true;
        let text = format!("{} devotes and takes up the {role} role.", self.state.name(actor));
        self.state.log.action(actor, text);
        self.trim_info_traps(actor);
        Ok(self.pass_turn_charging(|me| {
            me.guess_cooldown = me.guess_cooldown.max(DEVOTION_COOLDOWN);
            me.hint_cooldown = me.hint_cooldown.max(DEVOTION_COOLDOWN);
        }))
    }

    // -----------------------------------------------------------------------
    // Yes/no questions
    // -----------------------------------------------------------------------

    pub(super) fn yes_no(
        &mut self,
        actor: PlayerSlot,
        predicate: Predicate,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.yes_no, "yes/no questions")?;
        let me = self.state.player(actor);
        if me.yes_no_used >= me.yes_no_allowance() {
            return Err(IllegalAction::QuotaExhausted("yes/no questions").into());
        }
        let analyst = me.has_role(Role::Analyst);
        if analyst && me.yes_no_this_turn {
            return Err(IllegalAction::AlreadyUsed("yes/no question this turn").into());
        }
        if analyst && me.yes_no_cooldown > 0 {
            return Err(IllegalAction::OnCooldown("yes/no question").into());
        }
        let secret = self.opponent_secret(actor)?;

        let answer = predicate.evaluate(secret);
        let me = self.state.player_mut(actor);
        me.yes_no_used += 1;
        me.yes_no_this_turn = true;
        if analyst {
            me.yes_no_cooldown = YES_NO_ANALYST_COOLDOWN;
        }
        let text = format!(
            "{} asks whether {predicate}: {}.",
            self.state.name(actor),
            if answer { "yes" } else { "no" }
        );
        self.state.log.action(actor, text);
        Ok(Directive::Continue)
    }
}
