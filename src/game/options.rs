use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// House rules for a single game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct GameOptions {
    /// Liberal policies needed for a liberal victory.
    pub liberal_threshold: usize,
    /// Fascist policies needed for a fascist victory.
    pub fascist_threshold: usize,
    /// Consecutive failed elections before the top policy is enacted.
    pub chaos_threshold: usize,
    /// Fascist policies after which electing Hitler as chancellor wins the game.
    pub hitler_zone: usize,
    /// Whether the veto power is available once five fascist policies are enacted.
    pub veto: bool,
    /// Liberal cards in the policy deck.
    pub liberal_cards: usize,
    /// Fascist cards in the policy deck.
    pub fascist_cards: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            liberal_threshold: 5,
            fascist_threshold: 6,
            chaos_threshold: 3,
            hitler_zone: 3,
            veto: true,
            liberal_cards: 6,
            fascist_cards: 11,
        }
    }
}

impl GameOptions {
    /// Returns a `GameError` if the combination of settings cannot produce a playable game.
    pub fn validate(&self) -> Result<(), GameError> {
        let tracks_reachable = self.liberal_threshold >= 1
            && self.fascist_threshold >= 1
            && self.liberal_threshold <= self.liberal_cards
            && self.fascist_threshold <= self.fascist_cards;
        // A legislative session needs three cards even when both tracks are one short of winning
        let deck_large_enough = self.liberal_cards + self.fascist_cards
            >= self.liberal_threshold + self.fascist_threshold + 1;
        if !tracks_reachable || !deck_large_enough || self.chaos_threshold == 0 {
            return Err(GameError::InvalidGameOptions);
        }
        Ok(())
    }
}
