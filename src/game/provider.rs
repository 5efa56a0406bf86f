use super::command::Command;
use super::player::PlayerId;
use super::snapshot::{Prompt, Snapshot};
use rand::prelude::SliceRandom;
use rand::{Rng, SeedableRng};

/// Chooses moves on behalf of an automated player.
///
/// The engine never trusts a provider: whatever it returns is validated like any other command.
pub trait MoveProvider {
    /// Picks a command for `player`, given that player's view of the game,
    /// or returns `None` if the player has nothing to do.
    fn next_move(&mut self, snapshot: &Snapshot, player: PlayerId) -> Option<Command>;
}

/// Plays uniformly random legal moves. Never vetoes; always responds to a veto at random.
pub struct RandomMoves {
    rng: rand_chacha::ChaCha8Rng,
}

impl RandomMoves {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveProvider for RandomMoves {
    fn next_move(&mut self, snapshot: &Snapshot, _player: PlayerId) -> Option<Command> {
        let rng = &mut self.rng;
        match snapshot.prompt.as_ref()? {
            Prompt::StartGame => Some(Command::StartGame),
            Prompt::NominateChancellor { options } => options
                .choose(rng)
                .map(|chancellor| Command::NominateChancellor { chancellor: *chancellor }),
            Prompt::Vote { .. } => Some(Command::CastVote { yes: rng.gen() }),
            Prompt::DrawPolicies => Some(Command::DrawPolicies),
            Prompt::PresidentDiscard { cards } => cards
                .choose(rng)
                .map(|card| Command::PresidentDiscard { card: card.id }),
            Prompt::ChancellorDiscard { cards, .. } => cards
                .choose(rng)
                .map(|card| Command::ChancellorDiscard { card: card.id }),
            Prompt::ApproveVeto { .. } => Some(Command::RespondVeto { approve: rng.gen() }),
            Prompt::ResolvePower { power, options } => {
                let target = if power.needs_target() {
                    Some(*options.choose(rng)?)
                } else {
                    None
                };
                Some(Command::ResolvePower { power: *power, target })
            }
            Prompt::Dead | Prompt::GameOver { .. } => None,
        }
    }
}
