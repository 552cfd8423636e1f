use guessduel::prelude::*;

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

const ADA: PlayerSlot = PlayerSlot::One;
const BO: PlayerSlot = PlayerSlot::Two;

/// One line of the script: who sends what.
enum Step {
    Send(PlayerSlot, Request),
    /// Print both players' views.
    Show,
}

fn join(name: &str, secret: i32) -> Request {
    Request::JoinSecret {
        name: name.into(),
        secret,
    }
}

fn act(action: Action) -> Request {
    Request::Act { action }
}

fn match_config() -> MatchConfig {
    MatchConfig {
        target_points: 2,
        rules: RuleToggles {
            traps: true,
            digit_declaration: true,
            yes_no: true,
            ..RuleToggles::default()
        },
        ..MatchConfig::default()
    }
}

/// Three rounds: a caught lie, a yes/no question, a straight guess.
fn script() -> Vec<Step> {
    use Step::*;
    vec![
        // Round 1, Ada starts.
        Send(ADA, join("Ada", 37)),
        Send(BO, join("Bo", 14)),
        Send(ADA, act(Action::SetKillTrap { value: 15 })),
        Send(BO, act(Action::DeclareLastDigit { digit: 3 })),
        Send(BO, act(Action::Guess { value: 30 })),
        Show,
        Send(ADA, act(Action::ChallengeDeclaration)),
        Send(ADA, act(Action::Guess { value: 14 })),
        Send(ADA, Request::FinishRound),
        Send(ADA, Request::NextRound),
        // Round 2, Bo lost and starts.
        Send(ADA, join("", 8)),
        Send(BO, join("", 44)),
        Send(BO, act(Action::YesNo {
            predicate: Predicate::AtMost { value: 10 },
        })),
        Send(BO, act(Action::Guess { value: 8 })),
        Show,
        Send(BO, Request::FinishRound),
        Send(BO, Request::NextRound),
        // Round 3, Ada starts.
        Send(ADA, join("", 21)),
        Send(BO, join("", 2)),
        Send(ADA, act(Action::Guess { value: 2 })),
        Send(ADA, Request::FinishRound),
        Send(BO, Request::FinishMatch),
    ]
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Plays the script through the byte-level service and returns the final
/// tally.
async fn run(service: &DuelService, seed: u64) -> Result<MatchSummary, Box<dyn std::error::Error>> {
    let room = service.create_seeded_room(Some(match_config()), seed).await?;
    let tokens = [
        service.bind_seat(room, ADA).await?,
        service.bind_seat(room, BO).await?,
    ];
    let codec = JsonCodec;

    let mut summary = None;
    for step in script() {
        let (slot, request) = match step {
            Step::Send(slot, request) => (slot, request),
            Step::Show => {
                for slot in PlayerSlot::BOTH {
                    print_view(service, &tokens[slot.index()]).await?;
                }
                continue;
            }
        };

        let bytes = codec.encode(&request)?;
        let reply = service.handle(&tokens[slot.index()], &bytes).await?;
        let response: Response = codec.decode(&reply)?;
        tracing::debug!(player = %slot, ?response, "scripted step");

        match response {
            Response::Error { code, message } => {
                return Err(format!("{slot}: {request:?} failed ({code}): {message}").into());
            }
            Response::RoundSummary { summary } => {
                println!(
                    "== Round {} to {} in {} tries (secrets {:?}, hidden {:?}), score {:?}",
                    summary.round_no,
                    summary.winner_name,
                    summary.winner_tries,
                    summary.secrets,
                    summary.hidden_number,
                    summary.scores
                );
            }
            Response::MatchSummary { summary: tally } => summary = Some(tally),
            _ => {}
        }
    }

    summary.ok_or_else(|| "script ended before the match did".into())
}

async fn print_view(service: &DuelService, token: &str) -> Result<(), Box<dyn std::error::Error>> {
    let response = service.dispatch(token, Request::View).await?;
    let Response::View { view } = response else {
        return Err("expected a view".into());
    };
    println!(
        "-- {} sees (round {}, {:?} to move):",
        view.names[view.viewer.index()],
        view.round_no,
        view.turn
    );
    for line in &view.log {
        println!("   {line}");
    }
    for notice in &view.notices {
        println!("   ! {notice}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let service = DuelService::default();
    let tally = run(&service, 2024).await?;

    println!(
        "Champion: {} ({} - {}) after {} rounds",
        tally.names[tally.champion.index()],
        tally.scores[0],
        tally.scores[1],
        tally.rounds_played
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_plays_to_ada_win() {
        let service = DuelService::default();
        let tally = run(&service, 7).await.unwrap();

        assert_eq!(tally.champion, ADA);
        assert_eq!(tally.scores, [2, 1]);
        assert_eq!(tally.rounds_played, 3);
        assert_eq!(tally.names, ["Ada".to_string(), "Bo".to_string()]);
    }

    #[tokio::test]
    async fn test_script_is_seed_independent() {
        for seed in [1, 99, 12345] {
            let service = DuelService::default();
            assert!(run(&service, seed).await.is_ok(), "seed {seed}");
        }
    }

    #[tokio::test]
    async fn test_out_of_turn_step_reports_conflict() {
        let service = DuelService::default();
        let room = service.create_room(Some(match_config())).await.unwrap();
        let ada = service.bind_seat(room, ADA).await.unwrap();
        let bo = service.bind_seat(room, BO).await.unwrap();
        service.dispatch(&ada, join("Ada", 10)).await.unwrap();
        service.dispatch(&bo, join("Bo", 20)).await.unwrap();

        let err = service
            .dispatch(&bo, act(Action::Guess { value: 10 }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 409);
    }
}
