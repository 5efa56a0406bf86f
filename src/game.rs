use self::board::Board;
use self::deck::{Card, Deck};
use self::eligible::EligiblePlayers;
use self::event::{EventLog, GameEvent, Teammate};
use self::executive_power::ExecutivePower;
use self::government::{Government, TermLimits};
use self::party::Party;
use self::player::{assign_roles, Player, PlayerDistribution, PlayerId, Role};
use self::votes::Votes;
use crate::error::{GameError, InvariantViolation};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::command::Command;
pub use self::event::LogEntry;
pub use self::options::GameOptions;
pub use self::provider::{MoveProvider, RandomMoves};
pub use self::snapshot::Snapshot;

mod board;
mod command;
pub mod deck;
mod election;
mod eligible;
pub mod event;
pub mod executive_power;
mod government;
mod legislative;
mod options;
pub mod party;
pub mod player;
mod provider;
pub mod replay;
pub mod snapshot;
mod test;
mod votes;

pub const MAX_PLAYERS: usize = 10;

/// A game of Secret Hitler.
#[derive(Clone, Debug)]
pub struct Game {
    opts: GameOptions,
    players: Vec<Player>,
    board: Board,
    deck: Deck,
    state: GameState,
    round: usize,
    presidential_turn: usize,
    election_tracker: usize,
    term_limits: TermLimits,
    last_government: Option<Government>,
    log: EventLog,
    rng: rand_chacha::ChaCha8Rng,
}

/// Represents the current phase in the game loop.
#[derive(Clone, Debug)]
enum GameState {
    Lobby,
    Election {
        president: PlayerId,
        chancellor: Option<PlayerId>,
        eligible_chancellors: EligiblePlayers,
        votes: Votes,
    },
    LegislativeSession {
        president: PlayerId,
        chancellor: PlayerId,
        turn: LegislativeSessionTurn,
    },
    ExecutiveAction {
        president: PlayerId,
        power: ExecutivePower,
        eligible: EligiblePlayers,
    },
    GameOver(WinCondition),
    Aborted(InvariantViolation),
}

#[derive(Clone, Copy, Debug)]
enum LegislativeSessionTurn {
    /// President must draw three cards.
    Draw,
    /// President must discard a card.
    President { cards: [Card; 3] },
    /// Chancellor must discard a card.
    Chancellor { cards: [Card; 2], veto: VetoStatus },
    /// Chancellor has called for a veto.
    VetoRequested { cards: [Card; 2] },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum VetoStatus {
    CannotVeto,
    CanVeto,
    VetoDenied,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// The liberals completed their policy track.
    LiberalPolicyTrack,
    /// The fascists completed their policy track.
    FascistPolicyTrack,
    /// Hitler was elected chancellor
    HitlerElected,
    /// Hitler was executed
    HitlerExecuted,
}

impl WinCondition {
    pub fn winning_party(&self) -> Party {
        match self {
            WinCondition::LiberalPolicyTrack | WinCondition::HitlerExecuted => Party::Liberal,
            WinCondition::FascistPolicyTrack | WinCondition::HitlerElected => Party::Fascist,
        }
    }
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WinCondition::LiberalPolicyTrack => "LiberalPolicyTrack",
            WinCondition::FascistPolicyTrack => "FascistPolicyTrack",
            WinCondition::HitlerElected => "HitlerElected",
            WinCondition::HitlerExecuted => "HitlerExecuted",
        };
        write!(f, "{}", s)
    }
}

impl Game {
    /// Creates an empty game of Secret Hitler, waiting for players to join.
    pub fn new(opts: GameOptions, seed: u64) -> Result<Self, GameError> {
        opts.validate()?;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::new(opts.liberal_cards, opts.fascist_cards, &mut rng);
        Ok(Game {
            opts,
            players: vec![],
            board: Board::new(0, &opts),
            deck,
            state: GameState::Lobby,
            round: 0,
            presidential_turn: 0,
            election_tracker: 0,
            term_limits: TermLimits::default(),
            last_government: None,
            log: EventLog::default(),
            rng,
        })
    }

    /// Adds a player to the lobby, or returns the id of the player who already joined with that name.
    pub fn join(&mut self, name: &str, human: bool) -> Result<PlayerId, GameError> {
        self.check_not_over()?;
        if !matches!(self.state, GameState::Lobby) {
            return self.find_player(name).map_err(|_| GameError::CannotJoinStartedGame);
        }
        if let Ok(id) = self.find_player(name) {
            return Ok(id);
        }
        if self.players.len() == MAX_PLAYERS {
            return Err(GameError::UnsupportedPlayerCount);
        }
        let id = PlayerId(self.players.len());
        self.players.push(Player::new(id, name.to_string(), human));
        self.log.public(GameEvent::PlayerJoined {
            player: id,
            name: name.to_string(),
            human,
        });
        Ok(id)
    }

    /// Assigns roles and starts the first election. Can only happen once.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.check_not_over()?;
        if !matches!(self.state, GameState::Lobby) {
            return Err(GameError::AlreadyAssigned);
        }

        let num_players = self.players.len();
        let distribution = PlayerDistribution::new(num_players)?;
        let roles = assign_roles(num_players, &mut self.rng)?;
        if !distribution.matches(&roles) {
            return Err(self.abort(InvariantViolation::RoleCount));
        }
        for (player, role) in self.players.iter_mut().zip(roles) {
            player.role = role;
        }
        self.board = Board::new(num_players, &self.opts);

        log::info!("Starting game with {} players", num_players);
        self.log.public(GameEvent::GameStarted {
            players: self.players.iter().map(|p| p.id).collect(),
            options: self.opts,
        });
        for player in &self.players {
            self.log.private(player.id, GameEvent::RoleAssigned {
                player: player.id,
                role: player.role,
            });
        }
        self.reveal_teammates(distribution);

        self.presidential_turn = self.rng.gen_range(0..num_players);
        self.start_election(None);
        Ok(())
    }

    /// Fascists learn each other; Hitler learns them too in small games.
    fn reveal_teammates(&mut self, distribution: PlayerDistribution) {
        let fascists = self
            .players
            .iter()
            .filter(|p| p.party() == Party::Fascist)
            .map(|p| Teammate { player: p.id, role: p.role })
            .collect::<Vec<_>>();
        for player in &self.players {
            let informed = match player.role {
                Role::Fascist => true,
                Role::Hitler => distribution.hitler_knows_fascists,
                Role::Liberal => false,
            };
            if !informed {
                continue;
            }
            let teammates = fascists.iter().filter(|t| t.player != player.id).copied().collect();
            self.log.private(player.id, GameEvent::TeammatesRevealed {
                player: player.id,
                teammates,
            });
        }
    }

    /// Finds a player with the given name.
    pub fn find_player(&self, name: &str) -> Result<PlayerId, GameError> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Returns true if the game is over.
    pub fn game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_) | GameState::Aborted(_))
    }

    /// The way the game was won, if it has been.
    pub fn outcome(&self) -> Option<WinCondition> {
        match self.state {
            GameState::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns whether a particular player has won.
    pub fn player_has_won(&self, player: PlayerId) -> bool {
        match (self.outcome(), self.players.get(player.0)) {
            (Some(outcome), Some(player)) => player.party() == outcome.winning_party(),
            _ => false,
        }
    }

    /// Players whose moves come from a move provider rather than a person.
    pub fn agents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().filter(|p| !p.human).map(|p| p.id)
    }

    /// The sequence number the next log entry will receive.
    pub fn next_sequence(&self) -> u64 {
        self.log.next_sequence()
    }

    /// Log entries from sequence number `since` onwards.
    pub fn events_since(&self, since: u64) -> &[LogEntry] {
        self.log.since(since)
    }

    /// Appends a line of table talk. The text is stored verbatim.
    pub fn statement(
        &mut self,
        speaker: PlayerId,
        text: String,
        addressed_to: Option<PlayerId>,
    ) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_speaker(speaker)?;
        if let Some(target) = addressed_to {
            self.check_player(target)?;
            if target == speaker {
                return Err(GameError::IllegalTarget);
            }
        }
        self.log.public(GameEvent::Statement { speaker, text, addressed_to });
        Ok(())
    }

    /// Appends a reply to another player's statement.
    pub fn response(&mut self, speaker: PlayerId, in_response_to: PlayerId, text: String) -> Result<(), GameError> {
        self.check_not_over()?;
        self.check_speaker(speaker)?;
        self.check_player(in_response_to)?;
        if in_response_to == speaker {
            return Err(GameError::IllegalTarget);
        }
        self.log.public(GameEvent::Response { speaker, in_response_to, text });
        Ok(())
    }

    fn check_speaker(&self, speaker: PlayerId) -> Result<(), GameError> {
        if !self.check_player(speaker)?.alive {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Ends the game with the given outcome.
    fn end_game(&mut self, outcome: WinCondition) {
        let winners = self
            .players
            .iter()
            .filter(|p| p.party() == outcome.winning_party())
            .map(|p| p.id)
            .collect();
        log::info!("Game over after {} rounds: {}", self.round, outcome);
        self.state = GameState::GameOver(outcome);
        self.log.public(GameEvent::GameEnded { outcome, winners });
    }

    /// Marks the game as irrecoverably inconsistent.
    fn abort(&mut self, reason: InvariantViolation) -> GameError {
        log::error!("Aborting game: {}", reason);
        self.state = GameState::Aborted(reason.clone());
        self.log.public(GameEvent::GameAborted { reason: reason.clone() });
        GameError::Aborted(reason)
    }

    /// Draws from the policy deck, aborting the game if the deck cannot supply the cards.
    fn draw_cards(&mut self, count: usize) -> Result<Vec<Card>, GameError> {
        match self.deck.draw(count, &mut self.rng) {
            Ok(cards) => Ok(cards),
            Err(err) => Err(self.abort(err)),
        }
    }

    /// Verifies that every policy card is accounted for.
    fn check_deck(&mut self) -> Result<(), GameError> {
        match self.deck.check(&self.board) {
            Ok(()) => Ok(()),
            Err(err) => Err(self.abort(err)),
        }
    }

    fn check_game_over(&mut self) -> bool {
        // Check for legislative victory
        if let Some(party) = self.board.check_tracks() {
            self.end_game(match party {
                Party::Liberal => WinCondition::LiberalPolicyTrack,
                Party::Fascist => WinCondition::FascistPolicyTrack,
            });
            return true;
        }

        // Check whether Hitler has been executed
        if self.players.iter().any(|p| p.role == Role::Hitler && !p.alive) {
            self.end_game(WinCondition::HitlerExecuted);
            return true;
        }

        false
    }

    /// Returns `Err` if no further moves can be made.
    fn check_not_over(&self) -> Result<(), GameError> {
        if self.game_over() {
            Err(GameError::GameAlreadyEnded)
        } else {
            Ok(())
        }
    }

    /// Returns the player with the given id, or an `Err` if there is none.
    fn check_player(&self, player: PlayerId) -> Result<&Player, GameError> {
        self.players.get(player.0).ok_or(GameError::PlayerNotFound)
    }

    /// Gets the number of players in the game.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Gets the number of players in the game that are alive.
    pub fn num_players_alive(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Finds the next alive player in seating order.
    fn next_player(&self, player: usize) -> usize {
        (player + 1..self.num_players())
            .chain(0..=player)
            .find(|idx| self.players[*idx].alive)
            .unwrap_or(player)
    }
}
