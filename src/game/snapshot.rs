use super::deck::Card;
use super::executive_power::ExecutivePower;
use super::government::{Government, TermLimits};
use super::player::{PlayerDistribution, PlayerId, Role};
use super::{Game, GameState, LegislativeSessionTurn, VetoStatus, WinCondition};
use crate::error::InvariantViolation;
use serde::{Deserialize, Serialize};

/// The state of the game as seen by one viewer (or an anonymous observer).
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Snapshot {
    pub viewer: Option<PlayerId>,
    pub round: usize,
    pub election_tracker: usize,
    pub chaos_threshold: usize,
    pub liberal_cards: usize,
    pub fascist_cards: usize,
    pub liberal_threshold: usize,
    pub fascist_threshold: usize,
    pub hitler_zone: usize,
    pub draw_pile: usize,
    pub discard_pile: usize,
    pub last_government: Option<Government>,
    /// Members of the last government who may not be nominated chancellor.
    pub term_limits: TermLimits,
    pub players: Vec<PublicPlayer>,
    pub phase: Phase,
    pub prompt: Option<Prompt>,
    pub next_sequence: u64,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub name: String,
    pub alive: bool,
    pub human: bool,
    pub not_hitler: bool,
    /// Only present for the viewer themselves, or for everyone once the game is over.
    pub role: Option<Role>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum Phase {
    Lobby,
    Nomination {
        president: PlayerId,
    },
    Voting {
        president: PlayerId,
        chancellor: PlayerId,
        votes: Vec<Option<bool>>,
    },
    LegislativeSession {
        president: PlayerId,
        chancellor: PlayerId,
        step: LegislativeStep,
    },
    ExecutiveAction {
        president: PlayerId,
        power: ExecutivePower,
    },
    GameOver {
        outcome: WinCondition,
    },
    Aborted {
        reason: InvariantViolation,
    },
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum LegislativeStep {
    Draw,
    President,
    Chancellor,
    VetoRequested,
}

/// The decision the viewer currently owes the game, if any.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type")]
pub enum Prompt {
    StartGame,
    NominateChancellor { options: Vec<PlayerId> },
    Vote { nominee: PlayerId },
    DrawPolicies,
    PresidentDiscard { cards: [Card; 3] },
    ChancellorDiscard { cards: [Card; 2], can_veto: bool },
    ApproveVeto { cards: [Card; 2] },
    ResolvePower { power: ExecutivePower, options: Vec<PlayerId> },
    Dead,
    GameOver { won: bool },
}

impl Game {
    /// Projects the current state for the given viewer.
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> Snapshot {
        let deck = self.deck.remaining();
        Snapshot {
            viewer,
            round: self.round,
            election_tracker: self.election_tracker,
            chaos_threshold: self.opts.chaos_threshold,
            liberal_cards: self.board.liberal_cards,
            fascist_cards: self.board.fascist_cards,
            liberal_threshold: self.opts.liberal_threshold,
            fascist_threshold: self.opts.fascist_threshold,
            hitler_zone: self.opts.hitler_zone,
            draw_pile: deck.draw_pile,
            discard_pile: deck.discard_pile,
            last_government: self.last_government,
            term_limits: self.term_limits,
            players: self
                .players
                .iter()
                .map(|p| PublicPlayer {
                    id: p.id,
                    name: p.name.clone(),
                    alive: p.alive,
                    human: p.human,
                    not_hitler: p.not_hitler,
                    role: (self.game_over() || viewer == Some(p.id)).then_some(p.role),
                })
                .collect(),
            phase: self.get_phase(),
            prompt: viewer.and_then(|viewer| self.get_prompt(viewer)),
            next_sequence: self.log.next_sequence(),
        }
    }

    fn get_phase(&self) -> Phase {
        match &self.state {
            GameState::Lobby => Phase::Lobby,
            GameState::Election { president, chancellor: None, .. } => Phase::Nomination { president: *president },
            GameState::Election { president, chancellor: Some(chancellor), votes, .. } => Phase::Voting {
                president: *president,
                chancellor: *chancellor,
                votes: votes.votes().to_vec(),
            },
            GameState::LegislativeSession { president, chancellor, turn } => Phase::LegislativeSession {
                president: *president,
                chancellor: *chancellor,
                step: match turn {
                    LegislativeSessionTurn::Draw => LegislativeStep::Draw,
                    LegislativeSessionTurn::President { .. } => LegislativeStep::President,
                    LegislativeSessionTurn::Chancellor { .. } => LegislativeStep::Chancellor,
                    LegislativeSessionTurn::VetoRequested { .. } => LegislativeStep::VetoRequested,
                },
            },
            GameState::ExecutiveAction { president, power, .. } => Phase::ExecutiveAction {
                president: *president,
                power: *power,
            },
            GameState::GameOver(outcome) => Phase::GameOver { outcome: *outcome },
            GameState::Aborted(reason) => Phase::Aborted { reason: reason.clone() },
        }
    }

    fn get_prompt(&self, viewer: PlayerId) -> Option<Prompt> {
        let player = self.players.get(viewer.0)?;
        if let GameState::GameOver(_) = self.state {
            return Some(Prompt::GameOver {
                won: self.player_has_won(viewer),
            });
        }
        if !player.alive {
            return Some(Prompt::Dead);
        }

        match &self.state {
            GameState::Lobby => PlayerDistribution::new(self.num_players()).is_ok().then_some(Prompt::StartGame),
            GameState::Election { president, chancellor: None, eligible_chancellors, .. } => {
                (viewer == *president).then(|| Prompt::NominateChancellor {
                    options: eligible_chancellors.ids(),
                })
            }
            GameState::Election { chancellor: Some(nominee), votes, .. } => {
                (!votes.has_cast(viewer)).then_some(Prompt::Vote { nominee: *nominee })
            }
            GameState::LegislativeSession { president, chancellor, turn } => match turn {
                LegislativeSessionTurn::Draw if viewer == *president => Some(Prompt::DrawPolicies),
                LegislativeSessionTurn::President { cards } if viewer == *president => {
                    Some(Prompt::PresidentDiscard { cards: *cards })
                }
                LegislativeSessionTurn::Chancellor { cards, veto } if viewer == *chancellor => {
                    Some(Prompt::ChancellorDiscard {
                        cards: *cards,
                        can_veto: *veto == VetoStatus::CanVeto,
                    })
                }
                LegislativeSessionTurn::VetoRequested { cards } if viewer == *president => {
                    Some(Prompt::ApproveVeto { cards: *cards })
                }
                _ => None,
            },
            GameState::ExecutiveAction { president, power, eligible } => {
                (viewer == *president).then(|| Prompt::ResolvePower {
                    power: *power,
                    options: if power.needs_target() { eligible.ids() } else { vec![] },
                })
            }
            GameState::GameOver(_) | GameState::Aborted(_) => None,
        }
    }
}
