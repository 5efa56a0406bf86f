use super::player::PlayerId;

/// Tracks the vote of each player.
#[derive(Clone, Debug)]
pub struct Votes {
    /// The number of votes needed before the election is decided
    num_voters: usize,
    votes: Vec<Option<bool>>,
}

impl Votes {
    /// Creates a new `Votes` for a roster of `num_players` seats, of which `num_voters` may vote.
    pub fn new(num_players: usize, num_voters: usize) -> Self {
        Self {
            num_voters,
            votes: vec![None; num_players],
        }
    }

    /// Returns whether the given player has cast their vote.
    pub fn has_cast(&self, player: PlayerId) -> bool {
        self.votes[player.0].is_some()
    }

    /// Records the vote of a player.
    pub fn vote(&mut self, player: PlayerId, vote: bool) {
        self.votes[player.0] = Some(vote);
    }

    pub fn yes(&self) -> usize {
        self.votes.iter().filter(|v| **v == Some(true)).count()
    }

    pub fn no(&self) -> usize {
        self.votes.iter().filter(|v| **v == Some(false)).count()
    }

    /// If all votes are counted, returns the outcome, otherwise returns `None`.
    /// An election passes only with a strict majority of the voters.
    pub fn outcome(&self) -> Option<bool> {
        let yes = self.yes();
        (yes + self.no() >= self.num_voters).then_some(yes * 2 > self.num_voters)
    }

    /// Gets the votes of each player.
    pub fn votes(&self) -> &[Option<bool>] {
        &self.votes
    }
}
