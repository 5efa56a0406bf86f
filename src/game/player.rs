use super::party::Party;
use crate::error::GameError;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::repeat;

/// Identifies a player for the lifetime of a game. Assigned in seating order.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player_{}", self.0)
    }
}

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
    pub human: bool,
    pub not_hitler: bool,
    pub investigated: bool,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
}

impl Role {
    pub fn party(&self) -> Party {
        match self {
            Role::Liberal => Party::Liberal,
            Role::Fascist | Role::Hitler => Party::Fascist,
        }
    }
}

impl Player {
    /// Creates a player who has joined the lobby; their role is fixed when the game starts.
    pub fn new(id: PlayerId, name: String, human: bool) -> Self {
        Self {
            id,
            name,
            role: Role::Liberal,
            alive: true,
            human,
            not_hitler: false,
            investigated: false,
        }
    }

    pub fn party(&self) -> Party {
        self.role.party()
    }
}

/// The number of each role for a given player count.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PlayerDistribution {
    pub num_players: usize,
    pub liberals: usize,
    /// Ordinary fascists, not counting Hitler.
    pub fascists: usize,
    /// Whether Hitler learns who the other fascists are.
    pub hitler_knows_fascists: bool,
}

impl PlayerDistribution {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        let fascists = match num_players {
            5 | 6 => 1,
            7 | 8 => 2,
            9 | 10 => 3,
            _ => return Err(GameError::UnsupportedPlayerCount),
        };
        Ok(Self {
            num_players,
            liberals: num_players - fascists - 1,
            fascists,
            hitler_knows_fascists: num_players <= 6,
        })
    }

    /// Returns `true` iff the roles match this distribution exactly.
    pub fn matches(&self, roles: &[Role]) -> bool {
        let count = |role| roles.iter().filter(|r| **r == role).count();
        roles.len() == self.num_players
            && count(Role::Hitler) == 1
            && count(Role::Fascist) == self.fascists
            && count(Role::Liberal) == self.liberals
    }
}

/// Deals one role per seat, uniformly at random.
pub fn assign_roles(num_players: usize, rng: &mut impl Rng) -> Result<Vec<Role>, GameError> {
    let distribution = PlayerDistribution::new(num_players)?;
    let mut roles = Vec::with_capacity(num_players);
    roles.push(Role::Hitler);
    roles.extend(repeat(Role::Fascist).take(distribution.fascists));
    roles.extend(repeat(Role::Liberal).take(distribution.liberals));
    roles.shuffle(rng);
    Ok(roles)
}
