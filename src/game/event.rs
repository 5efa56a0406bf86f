//! The append-only record of everything that happens in a game.
//!
//! Every event carries structured player ids and cards. Free text from table
//! talk is stored verbatim and never interpreted.

use super::{
    deck::Card, executive_power::ExecutivePower, party::Party, player::PlayerId, player::Role,
    GameOptions, WinCondition,
};
use crate::error::InvariantViolation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who may see an entry's payload. Enforcing this is the transport's job.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Private { player: PlayerId },
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Teammate {
    pub player: PlayerId,
    pub role: Role,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    PlayerJoined {
        player: PlayerId,
        name: String,
        human: bool,
    },
    GameStarted {
        players: Vec<PlayerId>,
        options: GameOptions,
    },
    RoleAssigned {
        player: PlayerId,
        role: Role,
    },
    TeammatesRevealed {
        player: PlayerId,
        teammates: Vec<Teammate>,
    },
    ElectionStarted {
        round: usize,
        president: PlayerId,
        special: bool,
    },
    ChancellorNominated {
        president: PlayerId,
        chancellor: PlayerId,
    },
    VoteCast {
        voter: PlayerId,
        nominee: PlayerId,
        vote: bool,
    },
    ElectionResolved {
        president: PlayerId,
        chancellor: PlayerId,
        passed: bool,
        yes: usize,
        no: usize,
        election_tracker: usize,
    },
    PoliciesDrawn {
        president: PlayerId,
        cards: Vec<Card>,
    },
    PolicyDiscarded {
        player: PlayerId,
        card: Card,
    },
    PoliciesPassed {
        president: PlayerId,
        chancellor: PlayerId,
        cards: Vec<Card>,
    },
    VetoProposed {
        chancellor: PlayerId,
    },
    VetoResolved {
        president: PlayerId,
        approved: bool,
    },
    PolicyEnacted {
        president: PlayerId,
        chancellor: PlayerId,
        card: Card,
        liberal_cards: usize,
        fascist_cards: usize,
    },
    ChaosPolicy {
        party: Party,
        liberal_cards: usize,
        fascist_cards: usize,
    },
    PowerGranted {
        president: PlayerId,
        power: ExecutivePower,
    },
    PlayerInvestigated {
        president: PlayerId,
        target: PlayerId,
    },
    RoleRevealed {
        president: PlayerId,
        target: PlayerId,
        role: Role,
    },
    PolicyPeeked {
        president: PlayerId,
        cards: Vec<Party>,
    },
    SpecialElectionCalled {
        president: PlayerId,
        target: PlayerId,
    },
    PlayerExecuted {
        president: PlayerId,
        target: PlayerId,
    },
    Statement {
        speaker: PlayerId,
        text: String,
        addressed_to: Option<PlayerId>,
    },
    Response {
        speaker: PlayerId,
        in_response_to: PlayerId,
        text: String,
    },
    GameEnded {
        outcome: WinCondition,
        winners: Vec<PlayerId>,
    },
    GameAborted {
        reason: InvariantViolation,
    },
}

/// A single, immutable log entry.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct LogEntry {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub visibility: Visibility,
    pub event: GameEvent,
}

impl LogEntry {
    /// Whether the given viewer may see this entry. `None` is an anonymous observer.
    pub fn visible_to(&self, viewer: Option<PlayerId>) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::Private { player } => viewer == Some(player),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    /// Appends an event, returning its sequence number.
    pub fn push(&mut self, visibility: Visibility, event: GameEvent) -> u64 {
        let sequence = self.entries.len() as u64;
        self.entries.push(LogEntry {
            sequence,
            timestamp: Utc::now(),
            visibility,
            event,
        });
        sequence
    }

    pub fn public(&mut self, event: GameEvent) -> u64 {
        self.push(Visibility::Public, event)
    }

    pub fn private(&mut self, player: PlayerId, event: GameEvent) -> u64 {
        self.push(Visibility::Private { player }, event)
    }

    /// Entries with a sequence number of at least `sequence`, in order.
    pub fn since(&self, sequence: u64) -> &[LogEntry] {
        let start = usize::try_from(sequence).unwrap_or(usize::MAX).min(self.entries.len());
        &self.entries[start..]
    }

    /// The sequence number the next entry will receive.
    pub fn next_sequence(&self) -> u64 {
        self.entries.len() as u64
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}
