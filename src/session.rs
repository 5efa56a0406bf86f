use crate::error::GameError;
use crate::game::player::PlayerId;
use crate::game::replay::Projection;
use crate::game::{Command, Game, GameOptions, LogEntry, MoveProvider, Snapshot};
use dashmap::{mapref::entry::Entry, DashMap};
use rand::{Rng, RngCore};
use serde::Serialize;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Manages all the game sessions running on the server.
pub struct SessionManager {
    sessions: DashMap<String, SessionHandle>,
    /// How long a session may sit idle before it is purged.
    ttl: Duration,
}

/// A single game session.
///
/// Commands hold the write lock for their whole duration, so readers only ever
/// see the game between commands.
pub struct Session {
    /// The game ID.
    id: String,
    /// The game itself.
    game: RwLock<Game>,
    /// Publishes the next sequence number after every change to the log.
    updates: watch::Sender<u64>,
    /// Timestamp of the last time this session was interacted with.
    last_ts: Mutex<Instant>,
}

pub type SessionHandle = Arc<Session>;

/// A slice of the log, and where to continue reading from.
#[derive(Clone, Serialize, Debug)]
pub struct EventPage {
    pub events: Vec<LogEntry>,
    pub next_sequence: u64,
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn create_game(&self, options: GameOptions) -> Result<SessionHandle, GameError> {
        let seed = rand::thread_rng().next_u64();
        let game = Game::new(options, seed)?;
        loop {
            let id = Self::random_id();
            let entry = self.sessions.entry(id);
            if let Entry::Occupied(_) = entry {
                continue;
            }
            let session = Arc::new(Session::new(entry.key().clone(), game));
            entry.or_insert(session.clone());
            log::info!("Created game {}", session.id());
            break Ok(session);
        }
    }

    pub fn find_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(game_id)
            .map(|session| session.clone())
            .ok_or(GameError::GameNotFound)
    }

    pub fn num_games(&self) -> usize {
        self.sessions.len()
    }

    /// Drops sessions that have been idle for longer than the configured lifetime.
    pub fn purge_games(&self) {
        let now = Instant::now();
        self.sessions.retain(|game_id, session| {
            let Ok(last_ts) = session.last_ts.lock() else {
                log::error!("Found poisoned session: {}", game_id);
                return false;
            };
            let keep = now.duration_since(*last_ts) <= self.ttl;
            if !keep {
                log::info!("Purging idle game {}", game_id);
            }
            keep
        });
    }

    fn random_id() -> String {
        let mut rng = rand::thread_rng();
        (0..4)
            .map(|_| match rng.gen_range('A'..='Z') {
                // Avoid U and V because the "hitler font" can't distinguish them
                'U' => 'A',
                'V' => 'B',
                other => other,
            })
            .collect()
    }
}

impl Session {
    fn new(id: String, game: Game) -> Self {
        let (updates, _) = watch::channel(game.next_sequence());
        Self {
            id,
            game: RwLock::new(game),
            updates,
            last_ts: Mutex::new(Instant::now()),
        }
    }

    /// Gets the unique game ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Adds a player to the lobby, or finds the existing player with that name.
    pub fn join(&self, name: &str, human: bool) -> Result<PlayerId, GameError> {
        let mut game = self.write()?;
        let id = game.join(name, human)?;
        self.notify(&game);
        Ok(id)
    }

    /// Applies one command atomically, returning the next sequence number.
    pub fn apply(&self, actor: PlayerId, command: Command) -> Result<u64, GameError> {
        let mut game = self.write()?;
        log::debug!("[{}] {} submits {:?}", self.id, actor, command);
        let result = game.apply(actor, command);
        // An aborted game still appended an event
        self.notify(&game);
        result.map(|()| game.next_sequence())
    }

    /// The current state as seen by `viewer`.
    pub fn snapshot(&self, viewer: Option<PlayerId>) -> Result<Snapshot, GameError> {
        self.heartbeat();
        Ok(self.read()?.snapshot(viewer))
    }

    /// Log entries from `since` onwards that `viewer` may see.
    pub fn events(&self, since: u64, viewer: Option<PlayerId>) -> Result<EventPage, GameError> {
        self.heartbeat();
        let game = self.read()?;
        Ok(EventPage {
            events: game
                .events_since(since)
                .iter()
                .filter(|entry| entry.visible_to(viewer))
                .cloned()
                .collect(),
            next_sequence: game.next_sequence(),
        })
    }

    /// Rebuilds the public state of the game from its public events alone.
    pub fn replay(&self) -> Result<Projection, GameError> {
        let game = self.read()?;
        Ok(Projection::replay(
            game.events_since(0).iter().filter(|entry| entry.visible_to(None)),
        ))
    }

    /// Returns a stream of next-sequence numbers, updated whenever events are appended.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Lets automated players move until every one of them is waiting on someone else.
    /// Returns the number of commands applied.
    pub fn step_agents(&self, provider: &mut dyn MoveProvider, max_moves: usize) -> Result<usize, GameError> {
        let mut applied = 0;
        while applied < max_moves {
            let next = {
                let game = self.read()?;
                if game.game_over() {
                    break;
                }
                let next = game
                    .agents()
                    .find_map(|player| provider.next_move(&game.snapshot(Some(player)), player).map(|cmd| (player, cmd)));
                next
            };
            let Some((player, command)) = next else {
                break;
            };
            if let Err(err) = self.apply(player, command) {
                log::warn!("[{}] agent {} made an illegal move: {}", self.id, player, err);
                return Err(err);
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Keeps the game session alive.
    pub fn heartbeat(&self) {
        if let Ok(mut last_ts) = self.last_ts.lock() {
            *last_ts = Instant::now();
        }
    }

    /// Notifies subscribers of the new end of the log.
    fn notify(&self, game: &Game) {
        self.updates.send_replace(game.next_sequence());
        self.heartbeat();
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Game>, GameError> {
        self.game.read().map_err(|_| {
            log::error!("Found poisoned session: {}", self.id);
            GameError::GameNotFound
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Game>, GameError> {
        self.game.write().map_err(|_| {
            log::error!("Found poisoned session: {}", self.id);
            GameError::GameNotFound
        })
    }
}
