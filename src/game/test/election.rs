//! Nominations, voting and the election tracker

use super::super::event::GameEvent;
use super::super::government::{Government, TermLimits};
use super::super::party::Party::*;
use super::super::player::PlayerId;
use super::super::GameState;
use super::test_utils::*;
use crate::error::GameError;
use crate::game::Command;

#[test]
fn test_only_the_president_may_nominate() {
    let mut game = create_started_game(5, 0);
    let president = president(&game);
    let chancellor = candidate(&game);
    let other = alive(&game).into_iter().find(|p| *p != president).unwrap();

    assert_eq!(
        game.apply(other, Command::NominateChancellor { chancellor }),
        Err(GameError::NotYourTurn)
    );
    assert_eq!(
        game.apply(president, Command::NominateChancellor { chancellor: president }),
        Err(GameError::IllegalTarget)
    );
    assert_eq!(
        game.apply(president, Command::NominateChancellor { chancellor: PlayerId(7) }),
        Err(GameError::PlayerNotFound)
    );
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();
    assert_eq!(
        game.apply(president, Command::NominateChancellor { chancellor }),
        Err(GameError::StateMismatch)
    );
}

#[test]
fn test_cannot_vote_before_nomination() {
    let mut game = create_started_game(5, 0);
    assert_eq!(game.apply(PlayerId(0), Command::CastVote { yes: true }), Err(GameError::StateMismatch));
}

#[test]
fn test_each_player_votes_once() {
    let mut game = create_started_game(5, 0);
    let president = president(&game);
    let chancellor = candidate(&game);
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();
    game.apply(PlayerId(2), Command::CastVote { yes: true }).unwrap();
    assert_eq!(game.apply(PlayerId(2), Command::CastVote { yes: false }), Err(GameError::NotYourTurn));
}

#[test]
fn test_strict_majority_of_seven() {
    let mut game = create_started_game(7, 0);
    let president = president(&game);
    let chancellor = candidate(&game);
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();
    vote(&mut game, 3);
    assert_eq!(game.election_tracker, 1);
    assert!(matches!(game.state, GameState::Election { chancellor: None, .. }));

    let chancellor = candidate(&game);
    elect(&mut game, chancellor);
    assert!(matches!(game.state, GameState::LegislativeSession { .. }));
    assert_eq!(game.election_tracker, 0);

    let mut game = create_started_game(7, 0);
    let president = super::test_utils::president(&game);
    let chancellor = candidate(&game);
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();
    vote(&mut game, 4);
    assert!(matches!(game.state, GameState::LegislativeSession { .. }));
}

#[test]
fn test_tie_fails() {
    let mut game = create_started_game(6, 0);
    let president = president(&game);
    let chancellor = candidate(&game);
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();
    vote(&mut game, 3);
    assert_eq!(game.election_tracker, 1);
    assert!(events(&game).iter().any(|event| matches!(
        event,
        GameEvent::ElectionResolved { passed: false, yes: 3, no: 3, election_tracker: 1, .. }
    )));
}

#[test]
fn test_presidency_rotates_in_seat_order() {
    let mut game = create_started_game(5, 0);
    let first = president(&game);
    fail_election(&mut game);
    assert_eq!(president(&game), PlayerId((first.0 + 1) % 5));
    fail_election(&mut game);
    assert_eq!(president(&game), PlayerId((first.0 + 2) % 5));
}

#[test]
fn test_last_government_is_term_limited() {
    let mut game = create_started_game(5, 0);
    rig_roles(&mut game, PlayerId(0));
    let president = president(&game);
    let chancellor = candidate(&game);
    enact_with(&mut game, chancellor, Liberal);

    assert_eq!(game.last_government, Some(Government { president, chancellor }));
    let eligible = eligible_chancellors(&game);
    assert!(!eligible.contains(&president));
    assert!(!eligible.contains(&chancellor));
    assert_eq!(
        game.apply(super::test_utils::president(&game), Command::NominateChancellor { chancellor }),
        Err(GameError::IllegalTarget)
    );
}

#[test]
fn test_term_limits_relax_when_few_players_remain() {
    let limits = TermLimits {
        president: Some(PlayerId(1)),
        chancellor: Some(PlayerId(2)),
    };
    assert!(limits.excludes(PlayerId(1), 5));
    assert!(limits.excludes(PlayerId(2), 5));
    assert!(!limits.excludes(PlayerId(1), 4));
    assert!(limits.excludes(PlayerId(2), 4));
    assert!(!limits.excludes(PlayerId(3), 5));
}

#[test]
fn test_chaos_after_three_failed_elections() {
    let mut game = create_started_game(5, 0);
    rig_roles(&mut game, PlayerId(0));
    let chancellor = candidate(&game);
    enact_with(&mut game, chancellor, Liberal);
    assert_ne!(game.term_limits, TermLimits::default());

    let mut draw = vec![Fascist];
    draw.extend(filler());
    stack_deck(&mut game, draw);

    fail_election(&mut game);
    fail_election(&mut game);
    assert_eq!(game.election_tracker, 2);
    let third = president(&game);
    fail_election(&mut game);

    assert_eq!(game.board.fascist_cards, 1);
    assert_eq!(game.board.liberal_cards, 1);
    assert_eq!(game.election_tracker, 0);
    assert_eq!(game.term_limits, TermLimits::default());
    assert!(events(&game).iter().any(|event| matches!(
        event,
        GameEvent::ChaosPolicy { party: Fascist, liberal_cards: 1, fascist_cards: 1 }
    )));

    // The round continues with the next president in rotation and everyone is eligible again
    let next = president(&game);
    assert_eq!(next, PlayerId((third.0 + 1) % 5));
    assert_eq!(eligible_chancellors(&game).len(), 4);
}

#[test]
fn test_chaos_policy_grants_no_power() {
    let mut game = create_started_game(7, 0);
    set_tracks(&mut game, 0, 1);
    let mut draw = vec![Fascist];
    draw.extend(filler());
    stack_deck(&mut game, draw);

    for _ in 0..3 {
        fail_election(&mut game);
    }

    // A second fascist policy would normally let the president investigate
    assert_eq!(game.board.fascist_cards, 2);
    assert!(matches!(game.state, GameState::Election { chancellor: None, .. }));
    assert!(!events(&game).iter().any(|event| matches!(event, GameEvent::PowerGranted { .. })));
}

#[test]
fn test_electing_a_government_resets_the_tracker() {
    let mut game = create_started_game(5, 0);
    fail_election(&mut game);
    fail_election(&mut game);
    assert_eq!(game.election_tracker, 2);
    let chancellor = candidate(&game);
    elect(&mut game, chancellor);
    assert_eq!(game.election_tracker, 0);
}
