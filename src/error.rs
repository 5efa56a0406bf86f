use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game] or [Session].
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum GameError {
    #[error("invalid combination of game options")]
    InvalidGameOptions,
    #[error("game does not exist")]
    GameNotFound,
    #[error("no player exists with the given id")]
    PlayerNotFound,
    #[error("cannot join a game in progress")]
    CannotJoinStartedGame,
    #[error("games must have between 5 and 10 players")]
    UnsupportedPlayerCount,
    #[error("roles have already been assigned for this game")]
    AlreadyAssigned,
    #[error("it is not this player's turn to act")]
    NotYourTurn,
    #[error("this player cannot be chosen for this action")]
    IllegalTarget,
    #[error("this action cannot be performed during this phase of the game")]
    StateMismatch,
    #[error("the chosen card is not in the chancellor's hand")]
    InvalidCard,
    #[error("the chosen card is not among the pending cards")]
    InvalidDiscard,
    #[error("the game has already ended")]
    GameAlreadyEnded,
    #[error("the game was aborted: {0}")]
    Aborted(#[from] InvariantViolation),
}

/// An internal consistency failure. These are never caused by a bad request;
/// a game that hits one is aborted.
#[derive(Error, Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub enum InvariantViolation {
    #[error("cannot draw {requested} cards with only {available} remaining")]
    InsufficientCards { requested: usize, available: usize },
    #[error("policy accounting mismatch for {party}: expected {expected}, found {found}")]
    DeckAccounting {
        party: String,
        expected: usize,
        found: usize,
    },
    #[error("role distribution mismatch")]
    RoleCount,
}
