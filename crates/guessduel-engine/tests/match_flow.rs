//! Whole-match flows through the public `Match` surface.

use guessduel_engine::{EngineError, IllegalAction, Match, MatchConfig, RuleToggles};
use guessduel_protocol::{
    Action, Decision, DecisionKind, Directive, HintKind, PlayerSlot, Predicate, RoundPhase,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const ONE: PlayerSlot = PlayerSlot::One;
const TWO: PlayerSlot = PlayerSlot::Two;

fn config(target_points: u32) -> MatchConfig {
    MatchConfig {
        target_points,
        ..MatchConfig::default()
    }
}

fn start(duel: &mut Match, one: i32, two: i32) {
    assert!(!duel.join_secret(ONE, "Ada", one).unwrap());
    assert!(duel.join_secret(TWO, "Bo", two).unwrap());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_single_point_match_ends_after_first_correct_guess() {
    let mut duel = Match::with_seed(config(1), 5).unwrap();
    start(&mut duel, 10, 20);

    assert_eq!(
        duel.apply(ONE, Action::Guess { value: 20 }).unwrap(),
        Directive::RoundEnd { winner: ONE }
    );

    let summary = duel.finish_round().unwrap();
    assert_eq!(summary.winner, ONE);
    assert_eq!(summary.winner_name, "Ada");
    assert_eq!(summary.winner_tries, 1);
    assert_eq!(summary.secrets, [Some(10), Some(20)]);
    assert!(summary.hidden_number.is_some());
    assert_eq!(summary.scores, [1, 0]);
    assert!(summary.match_over);
    assert_eq!(duel.phase(), RoundPhase::MatchEnded);

    let result = duel.finish_match().unwrap();
    assert_eq!(result.champion, ONE);
    assert_eq!(result.scores, [1, 0]);
    assert_eq!(result.rounds_played, 1);

    assert_eq!(
        duel.next_round().unwrap_err(),
        EngineError::InvalidPhase(RoundPhase::MatchEnded)
    );
}

#[test]
fn test_three_round_match_loser_starts_next_round() {
    let mut duel = Match::with_seed(config(2), 9).unwrap();

    start(&mut duel, 10, 20);
    duel.apply(ONE, Action::Guess { value: 20 }).unwrap();
    let first = duel.finish_round().unwrap();
    assert!(!first.match_over);
    assert_eq!(duel.phase(), RoundPhase::Intermission);
    assert_eq!(duel.state().starter, TWO);

    duel.next_round().unwrap();
    assert_eq!(duel.phase(), RoundPhase::AwaitingSecret(ONE));
    assert_eq!(duel.state().secrets, [None, None]);
    assert_eq!(duel.state().round_no, 2);

    start(&mut duel, 30, 40);
    assert_eq!(duel.state().turn, TWO);
    assert!(duel.view(ONE).own.may_choose_hint);
    assert!(!duel.view(TWO).own.may_choose_hint);
    assert_eq!(duel.state().tries, [0, 0]);
    assert!(duel.visible_log(ONE)[0].starts_with("Round 2 begins. Bo goes first."));

    duel.apply(TWO, Action::Guess { value: 30 }).unwrap();
    assert_eq!(duel.finish_round().unwrap().scores, [1, 1]);
    assert_eq!(duel.state().starter, ONE);

    duel.next_round().unwrap();
    start(&mut duel, 1, 2);
    duel.apply(ONE, Action::Guess { value: 2 }).unwrap();
    let last = duel.finish_round().unwrap();
    assert!(last.match_over);

    let result = duel.finish_match().unwrap();
    assert_eq!(result.champion, ONE);
    assert_eq!(result.scores, [2, 1]);
    assert_eq!(result.rounds_played, 3);
    assert_eq!(result.names, ["Ada".to_string(), "Bo".to_string()]);
}

#[test]
fn test_finish_round_while_playing_is_phase_error() {
    let mut duel = Match::with_seed(config(3), 1).unwrap();
    start(&mut duel, 10, 20);

    assert_eq!(
        duel.finish_round().unwrap_err(),
        EngineError::InvalidPhase(RoundPhase::InPlay)
    );
    assert!(duel.finish_match().is_err());
    assert!(duel.next_round().is_err());
}

// ---------------------------------------------------------------------------
// Secret collection
// ---------------------------------------------------------------------------

#[test]
fn test_join_secret_rejects_out_of_range_and_repeats() {
    let mut duel = Match::with_seed(config(3), 1).unwrap();

    assert!(matches!(
        duel.join_secret(ONE, "Ada", 0),
        Err(EngineError::Validation(_))
    ));
    duel.join_secret(ONE, "Ada", 10).unwrap();
    assert_eq!(
        duel.join_secret(ONE, "Ada", 11).unwrap_err(),
        EngineError::from(IllegalAction::SecretAlreadySet(ONE))
    );
    assert_eq!(duel.state().secret(ONE), Some(10));

    duel.join_secret(TWO, "Bo", 20).unwrap();
    assert_eq!(
        duel.join_secret(TWO, "Bo", 21).unwrap_err(),
        EngineError::InvalidPhase(RoundPhase::InPlay)
    );
}

#[test]
fn test_join_secret_second_slot_first() {
    let mut duel = Match::with_seed(config(3), 1).unwrap();
    assert!(!duel.join_secret(TWO, "Bo", 20).unwrap());
    assert_eq!(duel.phase(), RoundPhase::AwaitingSecret(ONE));
    assert!(duel.join_secret(ONE, "  ", 10).unwrap());
    assert_eq!(duel.state().name(ONE), "Player 1");
}

#[test]
fn test_negative_mode_accepts_negative_secrets() {
    let config = MatchConfig {
        allow_negative: true,
        ..MatchConfig::default()
    };
    let mut duel = Match::with_seed(config, 3).unwrap();
    start(&mut duel, -40, 0);

    let hidden = duel.state().hidden_number.unwrap();
    assert!(hidden != 0 && (-30..=30).contains(&hidden));
    assert_eq!(duel.view(ONE).secret_range, (-50, 50));
    assert_eq!(
        duel.apply(ONE, Action::Guess { value: 0 }).unwrap(),
        Directive::RoundEnd { winner: ONE }
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(Match::new(config(0)).is_err());
    assert!(Match::new(MatchConfig::default()).is_ok());
}

// ---------------------------------------------------------------------------
// Views and snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_view_reports_own_resources_and_opponent_tries() {
    let config = MatchConfig {
        rules: RuleToggles {
            traps: true,
            ..RuleToggles::default()
        },
        ..MatchConfig::default()
    };
    let mut duel = Match::with_seed(config, 2).unwrap();
    start(&mut duel, 10, 20);
    duel.apply(ONE, Action::SetKillTrap { value: 40 }).unwrap();
    duel.apply(TWO, Action::Guess { value: 3 }).unwrap();

    let view = duel.view(ONE);
    assert_eq!(view.viewer, ONE);
    assert_eq!(view.turn, ONE);
    assert_eq!(view.own.secret, Some(10));
    assert_eq!(view.own.kill_trap, Some(40));
    assert_eq!(view.own.info_cap, 7);
    assert_eq!(view.opponent_tries, 1);
    assert_eq!(view.names, ["Ada".to_string(), "Bo".to_string()]);
    assert!(view.prompt.is_none());

    let other = duel.view(TWO);
    assert_eq!(other.own.kill_trap, None);
    assert!(!other.log.iter().any(|l| l.contains("kill trap at 40")));
}

#[test]
fn test_state_serializes_to_json() {
    let mut duel = Match::with_seed(config(3), 4).unwrap();
    start(&mut duel, 10, 20);

    let json = serde_json::to_value(duel.state()).unwrap();
    assert_eq!(json["round_no"], 1);
    assert_eq!(json["secrets"][0], 10);
    assert_eq!(json["phase"]["phase"], "in_play");
}

// ---------------------------------------------------------------------------
// Randomized play
// ---------------------------------------------------------------------------

fn random_action(rng: &mut StdRng) -> Action {
    let value = rng.random_range(1..=50);
    match rng.random_range(0..12) {
        0..=3 => Action::Guess { value },
        4 => Action::Hint {
            choose: HintKind::ALL.choose(rng).copied(),
        },
        5 => Action::ChangeSecret { value },
        6 => Action::SetKillTrap { value },
        7 => Action::SetInfoTraps {
            values: vec![value, value + 1, value + 2],
            bulk: rng.random_bool(0.5),
        },
        8 => Action::SetBluff {
            kind: HintKind::Sum,
            value,
        },
        9 => match rng.random_range(0..3) {
            0 => Action::ArmGuessFlag,
            1 => Action::DeclareLastDigit {
                digit: rng.random_range(0..10),
            },
            _ => Action::ChallengeDeclaration,
        },
        10 => Action::Devote,
        _ => Action::YesNo {
            predicate: Predicate::AtLeast { value },
        },
    }
}

fn random_step(duel: &mut Match, rng: &mut StdRng) -> Result<Directive, EngineError> {
    let actor = duel.state().turn;
    let Some(prompt) = duel.view(actor).prompt else {
        return duel.apply(actor, random_action(rng));
    };
    match prompt.kind {
        DecisionKind::HintBluff => {
            let decision = if rng.random_bool(0.5) {
                Decision::Believe
            } else {
                Decision::Accuse
            };
            duel.resolve_decision(actor, decision)
        }
        DecisionKind::Devotion => {
            let role = prompt.role_options[0];
            duel.resolve_decision(actor, Decision::PickRole { role })
        }
        DecisionKind::FreeGuess | DecisionKind::SuddenPress => {
            if rng.random_bool(0.8) {
                duel.apply(actor, Action::Guess {
                    value: rng.random_range(1..=50),
                })
            } else {
                duel.apply(actor, Action::Decline)
            }
        }
    }
}

#[test]
fn test_random_play_keeps_invariants() {
    for seed in 0..12u64 {
        let config = MatchConfig {
            target_points: 2,
            rules: RuleToggles::all(),
            ..MatchConfig::default()
        };
        let mut duel = Match::with_seed(config, seed).unwrap();
        let mut rng = StdRng::seed_from_u64(seed + 1000);
        start(&mut duel, rng.random_range(1..=50), rng.random_range(1..=50));

        let mut scores = [0, 0];
        let mut round_no = 1;
        for _ in 0..20_000 {
            match duel.phase() {
                RoundPhase::InPlay => {
                    let before = duel.state().clone();
                    if random_step(&mut duel, &mut rng).is_err() {
                        assert_eq!(duel.state(), &before, "rejected call mutated state");
                    }
                    for slot in PlayerSlot::BOTH {
                        let player = duel.state().player(slot);
                        assert!(player.info_traps.len() <= player.info_cap());
                    }
                }
                RoundPhase::RoundEnded(winner) => {
                    let summary = duel.finish_round().unwrap();
                    assert_eq!(summary.winner, winner);
                    assert_eq!(
                        summary.scores[winner.index()],
                        scores[winner.index()] + 1
                    );
                    assert_eq!(
                        summary.scores[winner.other().index()],
                        scores[winner.other().index()]
                    );
                    scores = summary.scores;
                }
                RoundPhase::Intermission => {
                    duel.next_round().unwrap();
                    assert_eq!(duel.state().round_no, round_no + 1);
                    round_no += 1;
                    start(&mut duel, rng.random_range(1..=50), rng.random_range(1..=50));
                }
                RoundPhase::MatchEnded => break,
                RoundPhase::AwaitingSecret(slot) => panic!("unexpected wait for {slot}"),
            }
        }
    }
}
