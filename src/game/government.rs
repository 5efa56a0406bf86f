use super::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Government {
    pub president: PlayerId,
    pub chancellor: PlayerId,
}

/// Remembers the last elected government, whose members may not immediately serve as chancellor again.
#[derive(Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Debug)]
pub struct TermLimits {
    pub president: Option<PlayerId>,
    pub chancellor: Option<PlayerId>,
}

impl TermLimits {
    /// Records a newly elected government.
    pub fn elected(&mut self, government: Government) {
        self.president = Some(government.president);
        self.chancellor = Some(government.chancellor);
    }

    /// Forgets the last government, as happens after a chaos policy.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Forgets an executed player.
    pub fn remove(&mut self, player: PlayerId) {
        if self.president == Some(player) {
            self.president = None;
        }
        if self.chancellor == Some(player) {
            self.chancellor = None;
        }
    }

    /// Returns `true` iff the player may not be nominated chancellor.
    /// With fewer than five players alive only the last chancellor is term-limited.
    pub fn excludes(&self, player: PlayerId, num_alive: usize) -> bool {
        self.chancellor == Some(player) || (num_alive >= 5 && self.president == Some(player))
    }
}
