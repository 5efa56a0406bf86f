use super::{executive_power::ExecutivePower, party::Party, GameOptions};

/// The two policy tracks.
#[derive(Clone, Debug)]
pub struct Board {
    pub num_players: usize,
    pub liberal_cards: usize,
    pub fascist_cards: usize,
    pub liberal_threshold: usize,
    pub fascist_threshold: usize,
}

impl Board {
    /// Creates a new board.
    pub fn new(num_players: usize, opts: &GameOptions) -> Self {
        Board {
            num_players,
            liberal_cards: 0,
            fascist_cards: 0,
            liberal_threshold: opts.liberal_threshold,
            fascist_threshold: opts.fascist_threshold,
        }
    }

    /// Plays a card onto its track.
    pub fn play_card(&mut self, party: Party) {
        match party {
            Party::Liberal => self.liberal_cards += 1,
            Party::Fascist => self.fascist_cards += 1,
        }
    }

    /// Gets the executive power unlocked by the last played fascist card, if there is any.
    pub fn get_executive_power(&self, party: Party) -> Option<ExecutivePower> {
        use ExecutivePower::*;
        if party != Party::Fascist {
            return None;
        }
        match (self.num_players, self.fascist_cards) {
            (9..=10, 1) => Some(InvestigatePlayer),
            (7..=10, 2) => Some(InvestigatePlayer),
            (5..=6, 3) => Some(PolicyPeek),
            (7..=10, 3) => Some(SpecialElection),
            (_, 4) => Some(Execution),
            (_, 5) => Some(Execution),
            _ => None,
        }
    }

    /// Checks whether either party has completed their policy track.
    pub fn check_tracks(&self) -> Option<Party> {
        if self.liberal_cards >= self.liberal_threshold {
            return Some(Party::Liberal);
        }
        if self.fascist_cards >= self.fascist_threshold {
            return Some(Party::Fascist);
        }
        None
    }

    /// Checks whether veto power is unlocked.
    pub fn veto_unlocked(&self) -> bool {
        self.fascist_cards >= 5
    }
}
