//! Round and match transitions around the turn loop.

use guessduel_protocol::{MatchSummary, PlayerSlot, Role, RoundPhase, RoundSummary};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::error::EngineError;
use crate::player::PerPlayerRoundState;
use crate::resolver::TurnResolver;
use crate::state::RoomState;

/// Starts a round once both secrets are in: draws the hidden number, deals
/// roles, resets per-round resources and runs the starter's turn start.
pub(crate) fn start_round(state: &mut RoomState, rng: &mut StdRng) -> Result<(), EngineError> {
    if state.secrets.iter().any(Option::is_none) {
        return Err(EngineError::InvalidPhase(state.phase));
    }

    state.hidden_number = Some(state.config.hidden_range().sample(rng));
    state.tries = [0, 0];
    state.winner = None;
    state.pending = None;
    state.log.clear();

    let chooser = state.starter.other();
    let deal_roles = state.config.rules.roles;
    state.players = PlayerSlot::BOTH.map(|slot| {
        let roles = if deal_roles {
            Role::ALL.choose(rng).copied().into_iter().collect()
        } else {
            Vec::new()
        };
        PerPlayerRoundState::fresh(slot == chooser, roles)
    });
    state.phase = RoundPhase::InPlay;

    let text = format!(
        "Round {} begins. {} goes first.",
        state.round_no,
        state.name(state.starter)
    );
    state.log.system(text);
    info!(round = state.round_no, starter = %state.starter, "round started");

    let starter = state.starter;
    TurnResolver::new(state, rng).begin_turn(starter);
    Ok(())
}

/// Scores a won round. The loser starts the next one.
pub(crate) fn finish_round(state: &mut RoomState) -> Result<RoundSummary, EngineError> {
    let RoundPhase::RoundEnded(winner) = state.phase else {
        return Err(EngineError::InvalidPhase(state.phase));
    };

    state.score[winner.index()] += 1;
    state.starter = winner.other();
    let match_over = state
        .score
        .iter()
        .any(|points| *points >= state.config.target_points);
    state.phase = if match_over {
        RoundPhase::MatchEnded
    } else {
        RoundPhase::Intermission
    };
    info!(
        round = state.round_no,
        %winner,
        score_one = state.score[0],
        score_two = state.score[1],
        match_over,
        "round finished"
    );

    Ok(RoundSummary {
        round_no: state.round_no,
        winner,
        winner_name: state.name(winner).to_owned(),
        winner_tries: state.tries[winner.index()],
        secrets: state.secrets,
        hidden_number: state.hidden_number,
        scores: state.score,
        match_over,
        log: state.log.texts(),
    })
}

/// Clears the secrets and opens the next round for secret collection.
pub(crate) fn next_round(state: &mut RoomState) -> Result<(), EngineError> {
    if state.phase != RoundPhase::Intermission {
        return Err(EngineError::InvalidPhase(state.phase));
    }
    state.secrets = [None, None];
    state.hidden_number = None;
    state.round_no += 1;
    state.phase = RoundPhase::AwaitingSecret(PlayerSlot::One);
    Ok(())
}

pub(crate) fn finish_match(state: &RoomState) -> Result<MatchSummary, EngineError> {
    if state.phase != RoundPhase::MatchEnded {
        return Err(EngineError::InvalidPhase(state.phase));
    }
    let champion = if state.score[1] > state.score[0] {
        PlayerSlot::Two
    } else {
        PlayerSlot::One
    };
    info!(%champion, rounds = state.round_no, "match finished");
    Ok(MatchSummary {
        names: state.names.clone(),
        scores: state.score,
        rounds_played: state.round_no,
        champion,
    })
}
