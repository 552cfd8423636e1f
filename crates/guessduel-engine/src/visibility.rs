//! Per-viewer filtering of the shared action log, plus the view snapshot.

use guessduel_protocol::{OwnResources, PlayerSlot, PlayerView, PromptView};

use crate::log::{EntryKind, LogEntry};
use crate::player::GuessFlag;
use crate::state::{Prompt, RoomState};

/// Whether `viewer` may read `entry`, the `index`-th entry of the log.
fn is_visible(entry: &LogEntry, index: usize, viewer: PlayerSlot, cutoff: Option<usize>) -> bool {
    match entry.author {
        None => true,
        Some(author) if author == viewer => true,
        Some(_) => entry.kind == EntryKind::Guess || cutoff.is_some_and(|c| index >= c),
    }
}

/// The log as `viewer` sees it. Recomputed on every call since grants can
/// become active mid-round.
pub(crate) fn visible_log(state: &RoomState, viewer: PlayerSlot) -> Vec<String> {
    let cutoff = state.player(viewer).grant.active_cutoff();
    state
        .log
        .entries()
        .iter()
        .enumerate()
        .filter(|(index, entry)| is_visible(entry, *index, viewer, cutoff))
        .map(|(_, entry)| entry.text.clone())
        .collect()
}

pub(crate) fn player_view(state: &RoomState, viewer: PlayerSlot) -> PlayerView {
    let me = state.player(viewer);
    let opponent = state.player(viewer.other());

    let prompt = state
        .pending
        .as_ref()
        .filter(|pending| pending.owner == viewer)
        .map(|pending| {
            let (preview, role_options) = match &pending.prompt {
                Prompt::Hint { preview, .. } => (Some(*preview), Vec::new()),
                Prompt::Devotion { options } => (None, options.clone()),
                Prompt::FreeGuess | Prompt::SuddenPress => (None, Vec::new()),
            };
            PromptView {
                kind: pending.prompt.kind(),
                preview,
                role_options,
            }
        });

    PlayerView {
        viewer,
        round_no: state.round_no,
        phase: state.phase,
        turn: state.turn,
        names: state.names.clone(),
        scores: state.score,
        target_points: state.config.target_points,
        secret_range: state.config.secret_range().bounds(),
        own: OwnResources {
            secret: state.secret(viewer),
            guess_cooldown: me.guess_cooldown,
            hint_cooldown: me.hint_cooldown,
            change_cooldown: me.change_cooldown,
            changes_left: me.changes_left(),
            hint_stock: me.hint_stock.clone(),
            may_choose_hint: me.can_choose_hint(),
            kill_trap: me.kill_trap,
            info_traps: me.info_traps.clone(),
            info_cap: me.info_cap(),
            free_info_left: me.free_info_left(),
            roles: me.roles.clone(),
            bluff: me.bluff,
            guess_flag_armed: me.guess_flag == GuessFlag::Armed,
            declared_digit: me.open_declaration(),
            yes_no_left: me.yes_no_allowance().saturating_sub(me.yes_no_used),
            skip_next_turn: me.skip_next_turn,
        },
        opponent_tries: state.tries[viewer.other().index()],
        grant: me.grant.status(),
        opponent_grant: opponent.grant.status(),
        opponent_declared_digit: opponent.open_declaration(),
        prompt,
        notices: me.notices.clone(),
        log: visible_log(state, viewer),
    }
}
