use guessduel_protocol::{Directive, HintReading, PlayerSlot};

use super::TurnResolver;
use crate::error::{EngineError, IllegalAction};
use crate::rules::BULK_INFO_LIMIT;

impl TurnResolver<'_> {
    /// Why `value` cannot hold one of `actor`'s traps, if it cannot.
    fn trap_problem(&self, actor: PlayerSlot, value: i32) -> Option<String> {
        let range = self.state.config.secret_range();
        if !range.contains(value) {
            return Some(format!("{value} is outside {}..={}", range.min, range.max));
        }
        let own = self.state.secret(actor)?;
        let collides = if self.state.config.allow_negative {
            own.abs() == value.abs()
        } else {
            own == value
        };
        collides.then(|| format!("{value} would sit on your own secret"))
    }

    pub(super) fn set_kill_trap(
        &mut self,
        actor: PlayerSlot,
        value: i32,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.traps, "traps")?;
        if let Some(problem) = self.trap_problem(actor, value) {
            return Err(EngineError::Validation(problem));
        }

        self.state.player_mut(actor).kill_trap = Some(value);
        let text = format!("{} sets a kill trap at {value}.", self.state.name(actor));
        self.state.log.action(actor, text);
        Ok(self.pass_turn())
    }

    /// Places info traps. A free placement keeps the turn and is bounded by
    /// the per-turn quota; a bulk placement of up to three ends the turn.
    pub(super) fn set_info_traps(
        &mut self,
        actor: PlayerSlot,
        values: &[i32],
        bulk: bool,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.traps, "traps")?;
        if values.is_empty() {
            return Err(EngineError::Validation("no trap values given".into()));
        }
        if bulk && values.len() > BULK_INFO_LIMIT {
            return Err(EngineError::Validation(format!(
                "at most {BULK_INFO_LIMIT} info traps per bulk placement"
            )));
        }
        let quota = if bulk {
            usize::MAX
        } else {
            match self.state.player(actor).free_info_left() {
                0 => return Err(IllegalAction::QuotaExhausted("free info-trap placements").into()),
                left => left as usize,
            }
        };

        let name = self.state.name(actor).to_owned();
        let cap = self.state.player(actor).info_cap();
        let mut placed = Vec::new();
        let mut notes = Vec::new();

        for &value in values {
            if let Some(problem) = self.trap_problem(actor, value) {
                notes.push(format!("Info trap skipped: {problem}."));
                continue;
            }
            let traps = &self.state.player(actor).info_traps;
            if traps.contains(&value) {
                continue;
            }
            if placed.len() >= quota {
                notes.push(format!("Info trap at {value} skipped: no free placements left this turn."));
                continue;
            }
            if traps.len() >= cap {
                notes.push(format!("Info trap at {value} skipped: the cap of {cap} is reached."));
                continue;
            }
            self.state.player_mut(actor).info_traps.push(value);
            placed.push(value);
        }

        for note in notes {
            self.state.log.action(actor, note);
        }
        if placed.is_empty() {
            self.state
                .log
                .action(actor, format!("{name} places no new info traps."));
        } else {
            let list = placed
                .iter()
                .map(i32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.state
                .log
                .action(actor, format!("{name} sets info traps at {list}."));
        }

        if bulk {
            Ok(self.pass_turn())
        } else {
            self.state.player_mut(actor).free_info_used += placed.len() as u32;
            Ok(Directive::Continue)
        }
    }

    /// Dismantles info traps that no longer fit after the cap shrank.
    pub(super) fn trim_info_traps(&mut self, actor: PlayerSlot) {
        let player = self.state.player_mut(actor);
        let dropped = player.enforce_info_cap();
        if dropped.is_empty() {
            return;
        }
        let cap = player.info_cap();
        let list = dropped
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.state.log.action(
            actor,
            format!("Info traps at {list} are dismantled to fit the cap of {cap}."),
        );
    }

    pub(super) fn set_bluff(
        &mut self,
        actor: PlayerSlot,
        bluff: HintReading,
    ) -> Result<Directive, EngineError> {
        self.ensure_rule(self.state.config.rules.bluff, "bluff")?;
        self.state.player_mut(actor).bluff = Some(bluff);
        let text = format!("{} stages a bluff: {bluff}", self.state.name(actor));
        self.state.log.action(actor, text);
        Ok(self.pass_turn())
    }
}
