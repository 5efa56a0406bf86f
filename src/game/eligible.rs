use super::{player::PlayerId, Game};

/// The set of players who may be chosen for some action.
#[derive(Clone, Debug)]
pub struct EligiblePlayers {
    eligible: Vec<bool>,
}

impl EligiblePlayers {
    pub fn includes(&self, player: PlayerId) -> bool {
        self.eligible.get(player.0).copied().unwrap_or(false)
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.eligible
            .iter()
            .enumerate()
            .filter(|(_, eligible)| **eligible)
            .map(|(idx, _)| PlayerId(idx))
            .collect()
    }
}

pub struct EligiblePlayersBuilder<'a> {
    game: &'a Game,
    eligible: Vec<bool>,
}

impl Game {
    /// Starts from the set of living players.
    pub fn eligible_players(&self) -> EligiblePlayersBuilder<'_> {
        EligiblePlayersBuilder {
            game: self,
            eligible: self.players.iter().map(|p| p.alive).collect(),
        }
    }
}

impl<'a> EligiblePlayersBuilder<'a> {
    pub fn exclude(mut self, player: PlayerId) -> Self {
        if let Some(eligible) = self.eligible.get_mut(player.0) {
            *eligible = false;
        }
        self
    }

    pub fn not_term_limited(mut self) -> Self {
        let num_alive = self.game.num_players_alive();
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= !self.game.term_limits.excludes(player.id, num_alive);
        }
        self
    }

    pub fn not_investigated(mut self) -> Self {
        for (idx, player) in self.game.players.iter().enumerate() {
            self.eligible[idx] &= !player.investigated;
        }
        self
    }

    pub fn make(self) -> EligiblePlayers {
        EligiblePlayers { eligible: self.eligible }
    }
}
