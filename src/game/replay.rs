//! Rebuilds the public state of a game from its event log alone.

use super::event::{GameEvent, LogEntry};
use super::executive_power::ExecutivePower;
use super::government::{Government, TermLimits};
use super::player::PlayerId;
use super::snapshot::{Phase, Snapshot};
use super::WinCondition;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Projection {
    pub round: usize,
    pub liberal_cards: usize,
    pub fascist_cards: usize,
    pub election_tracker: usize,
    pub alive: Vec<bool>,
    pub president: Option<PlayerId>,
    pub nominee: Option<PlayerId>,
    pub term_limits: TermLimits,
    /// An elected government has yet to enact its policy.
    pub legislative_session: bool,
    pub pending_power: Option<ExecutivePower>,
    pub outcome: Option<WinCondition>,
    pub aborted: bool,
}

impl Projection {
    pub fn replay<'a>(entries: impl IntoIterator<Item = &'a LogEntry>) -> Self {
        let mut projection = Self::default();
        for entry in entries {
            projection.apply(&entry.event);
        }
        projection
    }

    pub fn apply(&mut self, event: &GameEvent) {
        use GameEvent::*;
        match event {
            PlayerJoined { .. } => self.alive.push(true),
            ElectionStarted { round, president, .. } => {
                self.round = *round;
                self.president = Some(*president);
                self.nominee = None;
                self.legislative_session = false;
                self.pending_power = None;
            }
            ChancellorNominated { chancellor, .. } => self.nominee = Some(*chancellor),
            ElectionResolved {
                president,
                chancellor,
                passed,
                election_tracker,
                ..
            } => {
                self.election_tracker = *election_tracker;
                if *passed {
                    self.term_limits.elected(Government {
                        president: *president,
                        chancellor: *chancellor,
                    });
                    self.legislative_session = true;
                }
            }
            VetoResolved { approved: true, .. } => {
                self.election_tracker += 1;
                self.legislative_session = false;
            }
            PolicyEnacted { liberal_cards, fascist_cards, .. } => {
                self.liberal_cards = *liberal_cards;
                self.fascist_cards = *fascist_cards;
                self.legislative_session = false;
            }
            ChaosPolicy { liberal_cards, fascist_cards, .. } => {
                self.liberal_cards = *liberal_cards;
                self.fascist_cards = *fascist_cards;
                self.election_tracker = 0;
                self.term_limits.clear();
            }
            PowerGranted { power, .. } => {
                self.nominee = None;
                self.pending_power = Some(*power);
            }
            PlayerExecuted { target, .. } => {
                if let Some(alive) = self.alive.get_mut(target.0) {
                    *alive = false;
                }
                self.term_limits.remove(*target);
            }
            GameEnded { outcome, .. } => {
                self.outcome = Some(*outcome);
                self.clear_offices();
            }
            GameAborted { .. } => {
                self.aborted = true;
                self.clear_offices();
            }
            GameStarted { .. }
            | RoleAssigned { .. }
            | TeammatesRevealed { .. }
            | VoteCast { .. }
            | PoliciesDrawn { .. }
            | PolicyDiscarded { .. }
            | PoliciesPassed { .. }
            | VetoProposed { .. }
            | VetoResolved { approved: false, .. }
            | PlayerInvestigated { .. }
            | RoleRevealed { .. }
            | PolicyPeeked { .. }
            | SpecialElectionCalled { .. }
            | Statement { .. }
            | Response { .. } => {}
        }
    }

    fn clear_offices(&mut self) {
        self.president = None;
        self.nominee = None;
        self.legislative_session = false;
        self.pending_power = None;
    }

    /// Players the current president could nominate, derived from the log alone.
    pub fn eligible_chancellors(&self) -> Vec<PlayerId> {
        let Some(president) = self.president else {
            return vec![];
        };
        let num_alive = self.alive.iter().filter(|alive| **alive).count();
        (0..self.alive.len())
            .map(PlayerId)
            .filter(|&player| self.alive[player.0] && player != president)
            .filter(|&player| !self.term_limits.excludes(player, num_alive))
            .collect()
    }

    /// The same projection taken from a live snapshot, for comparison.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let (president, nominee, pending_power, outcome, aborted) = match &snapshot.phase {
            Phase::Lobby => (None, None, None, None, false),
            Phase::Nomination { president } => (Some(*president), None, None, None, false),
            Phase::Voting { president, chancellor, .. } | Phase::LegislativeSession { president, chancellor, .. } => {
                (Some(*president), Some(*chancellor), None, None, false)
            }
            Phase::ExecutiveAction { president, power } => (Some(*president), None, Some(*power), None, false),
            Phase::GameOver { outcome } => (None, None, None, Some(*outcome), false),
            Phase::Aborted { .. } => (None, None, None, None, true),
        };
        Self {
            round: snapshot.round,
            liberal_cards: snapshot.liberal_cards,
            fascist_cards: snapshot.fascist_cards,
            election_tracker: snapshot.election_tracker,
            alive: snapshot.players.iter().map(|p| p.alive).collect(),
            president,
            nominee,
            term_limits: snapshot.term_limits,
            legislative_session: matches!(snapshot.phase, Phase::LegislativeSession { .. }),
            pending_power,
            outcome,
            aborted,
        }
    }
}
