use super::event::GameEvent;
use super::player::{PlayerId, Role};
use super::{Game, GameState, WinCondition};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum ExecutivePower {
    /// The president must investigate a player's loyalty.
    InvestigatePlayer,
    /// The president must call a special election.
    SpecialElection,
    /// The president must peek at the top three cards on the deck.
    PolicyPeek,
    /// The president must execute a player.
    Execution,
}

impl ExecutivePower {
    /// Whether the president must choose another player to use this power.
    pub fn needs_target(&self) -> bool {
        !matches!(self, ExecutivePower::PolicyPeek)
    }
}

impl fmt::Display for ExecutivePower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutivePower::InvestigatePlayer => "investigate",
            ExecutivePower::SpecialElection => "specialElection",
            ExecutivePower::PolicyPeek => "policyPeek",
            ExecutivePower::Execution => "execution",
        };
        write!(f, "{}", s)
    }
}

impl Game {
    pub(super) fn start_executive_action(&mut self, president: PlayerId, power: ExecutivePower) {
        use ExecutivePower::*;

        let eligible = match power {
            InvestigatePlayer => self.eligible_players().not_investigated().exclude(president).make(),
            SpecialElection | Execution => self.eligible_players().exclude(president).make(),
            PolicyPeek => self.eligible_players().make(),
        };
        self.state = GameState::ExecutiveAction {
            president,
            power,
            eligible,
        };
        log::debug!("{} was granted the {} power", president, power);
        self.log.public(GameEvent::PowerGranted { president, power });
    }

    /// Called when the president uses the executive power they were granted.
    pub fn resolve_power(
        &mut self,
        player: PlayerId,
        power: ExecutivePower,
        target: Option<PlayerId>,
    ) -> Result<(), GameError> {
        use ExecutivePower::*;

        self.check_not_over()?;
        self.check_player(player)?;
        if let Some(target) = target {
            self.check_player(target)?;
        }

        let GameState::ExecutiveAction { president, power: pending, eligible } = &self.state else {
            return Err(GameError::StateMismatch);
        };
        if player != *president {
            return Err(GameError::NotYourTurn);
        }
        if power != *pending {
            return Err(GameError::StateMismatch);
        }
        let target = match (power.needs_target(), target) {
            (true, Some(target)) if eligible.includes(target) => Some(target),
            (false, None) => None,
            _ => return Err(GameError::IllegalTarget),
        };

        match (power, target) {
            (InvestigatePlayer, Some(target)) => {
                let target_player = &mut self.players[target.0];
                target_player.investigated = true;
                let role = target_player.role;
                self.log.public(GameEvent::PlayerInvestigated {
                    president: player,
                    target,
                });
                self.log.private(player, GameEvent::RoleRevealed {
                    president: player,
                    target,
                    role,
                });
                self.start_election(None);
            }
            (SpecialElection, Some(target)) => {
                self.log.public(GameEvent::SpecialElectionCalled {
                    president: player,
                    target,
                });
                self.start_election(Some(target));
            }
            (Execution, Some(target)) => {
                let target_player = &mut self.players[target.0];
                target_player.alive = false;
                let was_hitler = target_player.role == Role::Hitler;
                self.term_limits.remove(target);
                self.log.public(GameEvent::PlayerExecuted {
                    president: player,
                    target,
                });
                if was_hitler {
                    self.end_game(WinCondition::HitlerExecuted);
                } else {
                    self.start_election(None);
                }
            }
            (PolicyPeek, None) => {
                let cards = match self.deck.peek(3, &mut self.rng) {
                    Ok(cards) => cards,
                    Err(err) => return Err(self.abort(err)),
                };
                self.log.private(player, GameEvent::PolicyPeeked {
                    president: player,
                    cards,
                });
                self.start_election(None);
            }
            _ => return Err(GameError::IllegalTarget),
        }
        Ok(())
    }
}
