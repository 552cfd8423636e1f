//! Per-round, per-player resources.

use guessduel_protocol::{GrantStatus, HintKind, HintReading, Role};
use serde::{Deserialize, Serialize};

use crate::rules::{
    CHANGE_LIMIT, FREE_INFO_BASE, FREE_INFO_DECLARED, INFO_CAP_BASE, INFO_CAP_CEILING,
    INFO_CAP_DECLARED, INFO_CAP_DEVOTION_PENALTY, INFO_CAP_FLOOR, INFO_CAP_TRAPPER_BONUS,
    YES_NO_ANALYST, YES_NO_BASE,
};

/// Right to read the opponent's otherwise hidden log entries.
///
/// `cutoff` is the log length when the grant was earned; only entries at
/// or after it are revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewGrant {
    #[default]
    None,
    Pending { cutoff: usize },
    Active { cutoff: usize },
}

impl ViewGrant {
    pub fn status(&self) -> GrantStatus {
        match self {
            Self::None => GrantStatus::None,
            Self::Pending { .. } => GrantStatus::Pending,
            Self::Active { .. } => GrantStatus::Active,
        }
    }

    pub fn active_cutoff(&self) -> Option<usize> {
        match self {
            Self::Active { cutoff } => Some(*cutoff),
            _ => None,
        }
    }
}

/// One-shot guess-flag, per round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessFlag {
    #[default]
    Unused,
    Armed,
    Spent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    #[default]
    None,
    Open { digit: u8 },
    Resolved { digit: u8 },
    /// Dropped by a secret change before anyone challenged it.
    Withdrawn { digit: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayerRoundState {
    /// Hint kinds still undrawn. Refilled when the opponent changes secret.
    pub hint_stock: Vec<HintKind>,
    pub may_choose_hint: bool,

    pub guess_cooldown: u32,
    pub hint_cooldown: u32,
    pub change_cooldown: u32,
    pub changes_used: u32,
    /// Applied to `guess_cooldown` at the next miss that ends the turn.
    pub guess_penalty: u32,
    /// Standing cooldown charged after every hint.
    pub hint_penalty: u32,

    pub kill_trap: Option<i32>,
    pub info_traps: Vec<i32>,
    /// Free (turn-keeping) info-trap placements made this turn.
    pub free_info_used: u32,

    pub declaration: Declaration,
    /// Raised info cap and free placements, until the secret changes.
    pub declaration_bonus: bool,

    pub grant: ViewGrant,
    pub skip_next_turn: bool,
    pub bluff: Option<HintReading>,
    pub guess_flag: GuessFlag,
    pub sudden_press_used: bool,

    pub roles: Vec<Role>,
    pub guardian_spent: bool,
    pub disarmer_spent: bool,
    pub devotion_used: bool,
    pub devotion_penalty: bool,

    pub yes_no_used: u32,
    pub yes_no_cooldown: u32,
    pub yes_no_this_turn: bool,

    /// Private messages waiting to be shown to this player.
    pub notices: Vec<String>,
}

impl PerPlayerRoundState {
    pub fn fresh(may_choose_hint: bool, roles: Vec<Role>) -> Self {
        Self {
            hint_stock: HintKind::ALL.to_vec(),
            may_choose_hint,
            guess_cooldown: 0,
            hint_cooldown: 0,
            change_cooldown: 0,
            changes_used: 0,
            guess_penalty: 0,
            hint_penalty: 0,
            kill_trap: None,
            info_traps: Vec::new(),
            free_info_used: 0,
            declaration: Declaration::None,
            declaration_bonus: false,
            grant: ViewGrant::None,
            skip_next_turn: false,
            bluff: None,
            guess_flag: GuessFlag::Unused,
            sudden_press_used: false,
            roles,
            guardian_spent: false,
            disarmer_spent: false,
            devotion_used: false,
            devotion_penalty: false,
            yes_no_used: 0,
            yes_no_cooldown: 0,
            yes_no_this_turn: false,
            notices: Vec::new(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Maximum number of info traps this player may hold right now.
    pub fn info_cap(&self) -> usize {
        let mut cap = if self.declaration_bonus {
            INFO_CAP_DECLARED
        } else {
            INFO_CAP_BASE
        };
        if self.has_role(Role::Trapper) {
            cap += INFO_CAP_TRAPPER_BONUS;
        }
        if self.devotion_penalty {
            cap = cap.saturating_sub(INFO_CAP_DEVOTION_PENALTY);
        }
        cap.clamp(INFO_CAP_FLOOR, INFO_CAP_CEILING)
    }

    pub fn free_info_per_turn(&self) -> u32 {
        if self.declaration_bonus {
            FREE_INFO_DECLARED
        } else {
            FREE_INFO_BASE
        }
    }

    pub fn free_info_left(&self) -> u32 {
        self.free_info_per_turn().saturating_sub(self.free_info_used)
    }

    pub fn yes_no_allowance(&self) -> u32 {
        if self.has_role(Role::Analyst) {
            YES_NO_ANALYST
        } else {
            YES_NO_BASE
        }
    }

    pub fn changes_left(&self) -> u32 {
        CHANGE_LIMIT.saturating_sub(self.changes_used)
    }

    /// May this player pick the hint kind on their next hint?
    pub fn can_choose_hint(&self) -> bool {
        self.may_choose_hint || self.has_role(Role::Scholar)
    }

    /// Whether `value` collides with one of this player's traps.
    ///
    /// In negative mode a trap also collides with its mirror value.
    pub fn traps_collide_with(&self, value: i32, allow_negative: bool) -> bool {
        let same = |trap: i32| {
            if allow_negative {
                trap.abs() == value.abs()
            } else {
                trap == value
            }
        };
        self.kill_trap.is_some_and(same) || self.info_traps.iter().copied().any(same)
    }

    pub fn open_declaration(&self) -> Option<u8> {
        match self.declaration {
            Declaration::Open { digit } => Some(digit),
            _ => None,
        }
    }

    /// Drops the newest info traps until the set fits the current cap.
    pub(crate) fn enforce_info_cap(&mut self) -> Vec<i32> {
        let cap = self.info_cap();
        if self.info_traps.len() > cap {
            self.info_traps.split_off(cap)
        } else {
            Vec::new()
        }
    }

    /// Counts every cooldown down by one as the owner's turn ends. A yes/no
    /// cooldown charged during this turn starts counting on the next one.
    pub(crate) fn tick_cooldowns(&mut self) {
        for counter in [
            &mut self.guess_cooldown,
            &mut self.hint_cooldown,
            &mut self.change_cooldown,
        ] {
            *counter = counter.saturating_sub(1);
        }
        if !self.yes_no_this_turn {
            self.yes_no_cooldown = self.yes_no_cooldown.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_cap_base_and_declared() {
        let mut p = PerPlayerRoundState::fresh(false, vec![]);
        assert_eq!(p.info_cap(), 7);
        p.declaration_bonus = true;
        assert_eq!(p.info_cap(), 10);
    }

    #[test]
    fn test_info_cap_trapper_and_devotion_combine() {
        let mut p = PerPlayerRoundState::fresh(false, vec![Role::Trapper]);
        assert_eq!(p.info_cap(), 10);
        p.declaration_bonus = true;
        assert_eq!(p.info_cap(), 13);
        p.devotion_penalty = true;
        assert_eq!(p.info_cap(), 11);
    }

    #[test]
    fn test_free_info_per_turn_tracks_bonus() {
        let mut p = PerPlayerRoundState::fresh(false, vec![]);
        assert_eq!(p.free_info_left(), 1);
        p.declaration_bonus = true;
        assert_eq!(p.free_info_left(), 2);
        p.free_info_used = 2;
        assert_eq!(p.free_info_left(), 0);
    }

    #[test]
    fn test_traps_collide_with_mirror_in_negative_mode() {
        let mut p = PerPlayerRoundState::fresh(false, vec![]);
        p.info_traps.push(-12);
        assert!(p.traps_collide_with(12, true));
        assert!(!p.traps_collide_with(12, false));
        assert!(p.traps_collide_with(-12, false));
    }

    #[test]
    fn test_enforce_info_cap_drops_newest() {
        let mut p = PerPlayerRoundState::fresh(false, vec![]);
        p.declaration_bonus = true;
        p.info_traps = (1..=10).collect();
        p.declaration_bonus = false;
        assert_eq!(p.enforce_info_cap(), vec![8, 9, 10]);
        assert_eq!(p.info_traps.len(), 7);
        assert!(p.enforce_info_cap().is_empty());
    }

    #[test]
    fn test_tick_cooldowns_saturates() {
        let mut p = PerPlayerRoundState::fresh(false, vec![]);
        p.change_cooldown = 7;
        p.tick_cooldowns();
        p.tick_cooldowns();
        assert_eq!(p.change_cooldown, 5);
        assert_eq!(p.guess_cooldown, 0);
    }

    #[test]
    fn test_tick_cooldowns_holds_yes_no_charged_this_turn() {
        let mut p = PerPlayerRoundState::fresh(false, vec![Role::Analyst]);
        p.yes_no_cooldown = 2;
        p.yes_no_this_turn = true;
        p.tick_cooldowns();
        assert_eq!(p.yes_no_cooldown, 2);

        p.yes_no_this_turn = false;
        p.tick_cooldowns();
        assert_eq!(p.yes_no_cooldown, 1);
    }

    #[test]
    fn test_scholar_can_always_choose() {
        let p = PerPlayerRoundState::fresh(false, vec![Role::Scholar]);
        assert!(p.can_choose_hint());
        let q = PerPlayerRoundState::fresh(false, vec![]);
        assert!(!q.can_choose_hint());
    }
}
