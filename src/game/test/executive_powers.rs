//! Executive powers tests

use super::super::event::{GameEvent, Visibility};
use super::super::executive_power::ExecutivePower;
use super::super::party::Party::*;
use super::super::player::{PlayerId, Role};
use super::super::snapshot::Prompt;
use super::super::{GameState, WinCondition};
use super::test_utils::*;
use crate::error::GameError;
use crate::game::{Command, Game};

/// Enacts a fascist policy from the given track position and returns the government.
fn grant_power(game: &mut Game, fascist: usize) -> (PlayerId, PlayerId) {
    set_tracks(game, 0, fascist);
    let president = president(game);
    let chancellor = candidate(game);
    enact_with(game, chancellor, Fascist);
    (president, chancellor)
}

fn pending_power(game: &Game) -> Option<ExecutivePower> {
    match &game.state {
        GameState::ExecutiveAction { power, .. } => Some(*power),
        _ => None,
    }
}

#[test]
fn test_power_table() {
    let cases = [
        (5, 1, None),
        (5, 2, None),
        (5, 3, Some(ExecutivePower::PolicyPeek)),
        (6, 3, Some(ExecutivePower::PolicyPeek)),
        (7, 1, None),
        (7, 2, Some(ExecutivePower::InvestigatePlayer)),
        (8, 3, Some(ExecutivePower::SpecialElection)),
        (9, 1, Some(ExecutivePower::InvestigatePlayer)),
        (10, 2, Some(ExecutivePower::InvestigatePlayer)),
        (5, 4, Some(ExecutivePower::Execution)),
        (10, 5, Some(ExecutivePower::Execution)),
    ];
    for (num_players, fascist, expected) in cases {
        let mut game = create_started_game(num_players, 0);
        rig_roles(&mut game, PlayerId(0));
        grant_power(&mut game, fascist - 1);
        assert_eq!(pending_power(&game), expected, "{} players, fascist policy {}", num_players, fascist);
    }
}

#[test]
fn test_power_names() {
    assert_eq!(ExecutivePower::InvestigatePlayer.to_string(), "investigate");
    assert_eq!(ExecutivePower::SpecialElection.to_string(), "specialElection");
    assert_eq!(ExecutivePower::PolicyPeek.to_string(), "policyPeek");
    assert_eq!(ExecutivePower::Execution.to_string(), "execution");
}

#[test]
fn test_liberal_policies_grant_no_power() {
    let mut game = create_started_game(9, 0);
    enact(&mut game, Liberal);
    assert_eq!(pending_power(&game), None);
}

#[test]
fn test_only_the_president_uses_the_power() {
    let mut game = create_started_game(7, 0);
    let (president, chancellor) = grant_power(&mut game, 1);
    assert_eq!(pending_power(&game), Some(ExecutivePower::InvestigatePlayer));
    assert!(matches!(
        last_event(&game),
        GameEvent::PowerGranted { president: p, power: ExecutivePower::InvestigatePlayer } if *p == president
    ));

    let investigate = |target| Command::ResolvePower {
        power: ExecutivePower::InvestigatePlayer,
        target,
    };
    assert_eq!(game.apply(chancellor, investigate(Some(president))), Err(GameError::NotYourTurn));
    assert_eq!(game.apply(president, investigate(Some(president))), Err(GameError::IllegalTarget));
    assert_eq!(game.apply(president, investigate(None)), Err(GameError::IllegalTarget));
    assert_eq!(
        game.apply(president, Command::ResolvePower { power: ExecutivePower::Execution, target: Some(chancellor) }),
        Err(GameError::StateMismatch)
    );
    assert_eq!(game.apply(president, Command::DrawPolicies), Err(GameError::StateMismatch));
}

#[test]
fn test_investigation_is_private_to_the_president() {
    let mut game = create_started_game(7, 4);
    let hitler = PlayerId((president(&game).0 + 3) % 7);
    rig_roles(&mut game, hitler);
    let (president, chancellor) = grant_power(&mut game, 1);
    assert_ne!(chancellor, hitler);
    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::InvestigatePlayer,
            target: Some(hitler),
        },
    )
    .unwrap();

    assert!(game.players[hitler.0].investigated);
    let entries = game.log.entries();
    let public = entries
        .iter()
        .find(|e| matches!(e.event, GameEvent::PlayerInvestigated { .. }))
        .unwrap();
    assert_eq!(public.visibility, Visibility::Public);

    let revealed = entries
        .iter()
        .find(|e| matches!(e.event, GameEvent::RoleRevealed { .. }))
        .unwrap();
    assert_eq!(revealed.visibility, Visibility::Private { player: president });
    assert!(!revealed.visible_to(Some(chancellor)));
    assert_eq!(
        revealed.event,
        GameEvent::RoleRevealed {
            president,
            target: hitler,
            role: Role::Hitler,
        }
    );
    assert!(matches!(game.state, GameState::Election { chancellor: None, .. }));
}

#[test]
fn test_investigated_players_cannot_be_investigated_again() {
    let mut game = create_started_game(9, 0);
    rig_roles(&mut game, PlayerId(0));
    let (president, chancellor) = grant_power(&mut game, 0);
    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::InvestigatePlayer,
            target: Some(chancellor),
        },
    )
    .unwrap();

    // The second fascist policy in a nine player game grants another investigation
    let president = super::test_utils::president(&game);
    let next_chancellor = candidate(&game);
    enact_with(&mut game, next_chancellor, Fascist);
    let Some(Prompt::ResolvePower { options, .. }) = game.snapshot(Some(president)).prompt else {
        panic!("no power granted");
    };
    assert!(!options.contains(&chancellor));
    assert!(!options.contains(&president));
    assert_eq!(
        game.apply(
            president,
            Command::ResolvePower {
                power: ExecutivePower::InvestigatePlayer,
                target: Some(chancellor),
            }
        ),
        Err(GameError::IllegalTarget)
    );
}

#[test]
fn test_special_election_keeps_the_rotation() {
    let mut game = create_started_game(7, 0);
    rig_roles(&mut game, PlayerId(0));
    let (president, _) = grant_power(&mut game, 2);
    assert_eq!(pending_power(&game), Some(ExecutivePower::SpecialElection));

    let target = PlayerId((president.0 + 3) % 7);
    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::SpecialElection,
            target: Some(target),
        },
    )
    .unwrap();
    assert_eq!(super::test_utils::president(&game), target);
    assert!(matches!(
        last_event(&game),
        GameEvent::ElectionStarted { president: p, special: true, .. } if *p == target
    ));

    // After the special election the presidency returns to the left of the president who called it
    fail_election(&mut game);
    assert_eq!(super::test_utils::president(&game), PlayerId((president.0 + 1) % 7));
}

#[test]
fn test_policy_peek() {
    let mut game = create_started_game(5, 0);
    rig_roles(&mut game, PlayerId(0));
    let (president, _) = grant_power(&mut game, 2);
    assert_eq!(pending_power(&game), Some(ExecutivePower::PolicyPeek));
    let Some(Prompt::ResolvePower { options, .. }) = game.snapshot(Some(president)).prompt else {
        panic!("no power granted");
    };
    assert!(options.is_empty());

    assert_eq!(
        game.apply(
            president,
            Command::ResolvePower {
                power: ExecutivePower::PolicyPeek,
                target: Some(PlayerId(1)),
            }
        ),
        Err(GameError::IllegalTarget)
    );

    let top = game.deck.draw_pile()[..3].to_vec();
    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::PolicyPeek,
            target: None,
        },
    )
    .unwrap();

    let peeked = game
        .log
        .entries()
        .iter()
        .find(|e| matches!(e.event, GameEvent::PolicyPeeked { .. }))
        .unwrap();
    assert_eq!(peeked.visibility, Visibility::Private { player: president });
    assert_eq!(peeked.event, GameEvent::PolicyPeeked { president, cards: top.clone() });
    assert_eq!(&game.deck.draw_pile()[..3], &top[..]);
}

#[test]
fn test_executed_chancellor_leaves_the_game() {
    let mut game = create_started_game(7, 0);
    let (president, chancellor) = grant_power(&mut game, 3);
    // Make sure Hitler is neither member of the government
    let hitler = (0..7)
        .map(PlayerId)
        .find(|p| *p != president && *p != chancellor)
        .unwrap();
    rig_roles(&mut game, hitler);
    assert_eq!(pending_power(&game), Some(ExecutivePower::Execution));

    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::Execution,
            target: Some(chancellor),
        },
    )
    .unwrap();
    assert!(!game.game_over());
    assert!(!game.players[chancellor.0].alive);
    assert_eq!(game.num_players_alive(), 6);
    assert_eq!(game.term_limits.chancellor, None);

    // The executed player can no longer be nominated or vote
    assert!(!eligible_chancellors(&game).contains(&chancellor));
    let next = super::test_utils::president(&game);
    assert_ne!(next, chancellor);
    assert_eq!(
        game.apply(next, Command::NominateChancellor { chancellor }),
        Err(GameError::IllegalTarget)
    );
    let nominee = candidate(&game);
    game.apply(next, Command::NominateChancellor { chancellor: nominee }).unwrap();
    assert_eq!(game.apply(chancellor, Command::CastVote { yes: true }), Err(GameError::NotYourTurn));
    assert_eq!(game.snapshot(Some(chancellor)).prompt, Some(Prompt::Dead));

    // Three of six is not a majority
    vote(&mut game, 3);
    assert_eq!(game.election_tracker, 1);

    let nominee = candidate(&game);
    let next = super::test_utils::president(&game);
    game.apply(next, Command::NominateChancellor { chancellor: nominee }).unwrap();
    vote(&mut game, 4);
    assert!(matches!(game.state, GameState::LegislativeSession { .. }));
}

#[test]
fn test_executing_hitler_ends_the_game() {
    let mut game = create_started_game(5, 0);
    let hitler = PlayerId((president(&game).0 + 2) % 5);
    rig_roles(&mut game, hitler);
    let (president, _) = grant_power(&mut game, 3);
    assert_eq!(game.players[hitler.0].role, Role::Hitler);
    game.apply(
        president,
        Command::ResolvePower {
            power: ExecutivePower::Execution,
            target: Some(hitler),
        },
    )
    .unwrap();
    assert_eq!(game.outcome(), Some(WinCondition::HitlerExecuted));
    assert!(matches!(
        last_event(&game),
        GameEvent::GameEnded { outcome: WinCondition::HitlerExecuted, winners } if winners.len() == 3
    ));
}
