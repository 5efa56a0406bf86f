#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

use self::test_utils::*;
use super::player::{PlayerId, Role};
use super::snapshot::{Phase, Prompt};
use super::GameState;
use crate::error::GameError;
use crate::game::{Command, Game, GameOptions};

mod election;
mod executive_powers;

#[test]
fn can_create_game() {
    let game = Game::new(GameOptions::default(), 0).unwrap();
    assert!(matches!(game.state, GameState::Lobby));
    assert_eq!(game.num_players(), 0);
}

#[test]
fn invalid_options_are_rejected() {
    let opts = GameOptions {
        liberal_threshold: 7,
        ..GameOptions::default()
    };
    assert_eq!(Game::new(opts, 0).err(), Some(GameError::InvalidGameOptions));

    let opts = GameOptions {
        chaos_threshold: 0,
        ..GameOptions::default()
    };
    assert_eq!(Game::new(opts, 0).err(), Some(GameError::InvalidGameOptions));

    let opts = GameOptions {
        liberal_cards: 5,
        fascist_cards: 6,
        ..GameOptions::default()
    };
    assert_eq!(Game::new(opts, 0).err(), Some(GameError::InvalidGameOptions));
}

#[test]
fn options_fill_in_defaults() {
    let opts: GameOptions = serde_json::from_str(r#"{ "veto": false }"#).unwrap();
    assert_eq!(opts.veto, false);
    assert_eq!(opts.fascist_threshold, 6);
    assert_eq!(opts.liberal_cards, 6);
}

#[test]
fn joining_twice_returns_the_same_player() {
    let mut game = create_lobby(3, GameOptions::default(), 0);
    assert_eq!(game.join("Player1", false), Ok(PlayerId(1)));
    assert_eq!(game.num_players(), 3);
    assert_eq!(game.join("Newcomer", true), Ok(PlayerId(3)));
}

#[test]
fn cannot_join_a_started_game() {
    let mut game = create_started_game(5, 0);
    assert_eq!(game.join("Latecomer", false), Err(GameError::CannotJoinStartedGame));
    assert_eq!(game.join("Player2", false), Ok(PlayerId(2)));
}

#[test]
fn lobby_is_capped_at_ten_players() {
    let mut game = create_lobby(10, GameOptions::default(), 0);
    assert_eq!(game.join("Eleventh", false), Err(GameError::UnsupportedPlayerCount));
}

#[test]
fn unknown_players_are_rejected() {
    let mut game = create_started_game(5, 0);
    assert_eq!(game.apply(PlayerId(9), Command::DrawPolicies), Err(GameError::PlayerNotFound));
}

#[test]
fn snapshot_hides_other_roles() {
    let game = create_started_game(5, 3);
    let snapshot = game.snapshot(Some(PlayerId(1)));
    for player in &snapshot.players {
        assert_eq!(player.role.is_some(), player.id == PlayerId(1));
    }
    assert_eq!(snapshot.players[1].role, Some(game.players[1].role));

    let observer = game.snapshot(None);
    assert!(observer.players.iter().all(|p| p.role.is_none()));
    assert_eq!(observer.prompt, None);
}

#[test]
fn snapshot_prompts_the_president_to_nominate() {
    let game = create_started_game(6, 11);
    let president = president(&game);
    assert!(matches!(game.snapshot(None).phase, Phase::Nomination { president: p } if p == president));

    let Some(Prompt::NominateChancellor { options }) = game.snapshot(Some(president)).prompt else {
        panic!("president was not prompted");
    };
    assert_eq!(options, eligible_chancellors(&game));
    assert!(!options.contains(&president));
    assert_eq!(options.len(), 5);

    let other = options[0];
    assert_eq!(game.snapshot(Some(other)).prompt, None);
}

#[test]
fn snapshot_prompts_everyone_to_vote() {
    let mut game = create_started_game(5, 4);
    let president = president(&game);
    let chancellor = candidate(&game);
    game.apply(president, Command::NominateChancellor { chancellor }).unwrap();

    for player in alive(&game) {
        assert_eq!(game.snapshot(Some(player)).prompt, Some(Prompt::Vote { nominee: chancellor }));
    }
    game.apply(PlayerId(0), Command::CastVote { yes: true }).unwrap();
    assert_eq!(game.snapshot(Some(PlayerId(0))).prompt, None);
}

#[test]
fn roles_are_revealed_when_the_game_ends() {
    let mut game = create_started_game(5, 0);
    rig_roles(&mut game, PlayerId(4));
    for _ in 0..5 {
        enact(&mut game, super::party::Party::Liberal);
    }
    let snapshot = game.snapshot(None);
    assert!(matches!(snapshot.phase, Phase::GameOver { .. }));
    assert_eq!(snapshot.players[4].role, Some(Role::Hitler));
    assert_eq!(snapshot.players[0].role, Some(Role::Fascist));
    assert_eq!(
        game.snapshot(Some(PlayerId(1))).prompt,
        Some(Prompt::GameOver { won: true })
    );
    assert_eq!(
        game.snapshot(Some(PlayerId(4))).prompt,
        Some(Prompt::GameOver { won: false })
    );
}

#[test]
fn same_seed_gives_the_same_game() {
    let a = create_started_game(8, 99);
    let b = create_started_game(8, 99);
    let roles = |game: &Game| game.players.iter().map(|p| p.role).collect::<Vec<_>>();
    assert_eq!(roles(&a), roles(&b));
    assert_eq!(president(&a), president(&b));
    assert_eq!(a.deck.draw_pile(), b.deck.draw_pile());
}

#[test]
fn commands_round_trip_through_json() {
    let command: Command = serde_json::from_str(r#"{ "type": "nominateChancellor", "chancellor": 3 }"#).unwrap();
    assert_eq!(command, Command::NominateChancellor { chancellor: PlayerId(3) });

    let command: Command =
        serde_json::from_str(r#"{ "type": "resolvePower", "power": "PolicyPeek", "target": null }"#).unwrap();
    assert!(matches!(command, Command::ResolvePower { target: None, .. }));
}
