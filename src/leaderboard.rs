use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LeaderboardError, StoreError};
use crate::session::ScoreSubmission;

const LEADERBOARD_FILE_NAME: &str = "leaderboard.json";

/// One submitted score.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// Record store for submitted scores.
pub trait ScoreBoard: Send {
    /// Stores a new record and returns it.
    fn submit(&mut self, player: &str, score: u32) -> Result<LeaderboardEntry, LeaderboardError>;

    /// Returns at most `limit` records, highest score first.
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

/// Trims `player` and rejects blank names.
pub fn validate_player(player: &str) -> Result<&str, LeaderboardError> {
    let trimmed = player.trim();
    if trimmed.is_empty() {
        return Err(LeaderboardError::EmptyPlayer);
    }
    Ok(trimmed)
}

/// Highest scores first; equal scores keep submission order.
#[must_use]
pub fn rank(entries: &[LeaderboardEntry], limit: usize) -> Vec<LeaderboardEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

fn new_entry(player: &str, score: u32) -> Result<LeaderboardEntry, LeaderboardError> {
    Ok(LeaderboardEntry {
        player: validate_player(player)?.to_owned(),
        score,
        created_at: Utc::now(),
    })
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LeaderboardFile {
    entries: Vec<LeaderboardEntry>,
}

/// Records kept in `leaderboard.json`.
#[derive(Debug, Clone)]
pub struct JsonScoreBoard {
    path: PathBuf,
}

impl JsonScoreBoard {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted in `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(LEADERBOARD_FILE_NAME))
    }

    fn load(&self) -> Result<LeaderboardFile, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(LeaderboardFile::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&raw).map_err(|e| StoreError::parse(&self.path, e))
    }

    fn save(&self, file: &LeaderboardFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json =
            serde_json::to_string_pretty(file).map_err(|e| StoreError::parse(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl ScoreBoard for JsonScoreBoard {
    fn submit(&mut self, player: &str, score: u32) -> Result<LeaderboardEntry, LeaderboardError> {
        let entry = new_entry(player, score)?;
        let mut file = self.load()?;
        file.entries.push(entry.clone());
        self.save(&file)?;
        Ok(entry)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(rank(&self.load()?.entries, limit))
    }
}

/// In-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreBoard {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreBoard for MemoryScoreBoard {
    fn submit(&mut self, player: &str, score: u32) -> Result<LeaderboardEntry, LeaderboardError> {
        let entry = new_entry(player, score)?;
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(rank(&self.entries, limit))
    }
}

enum Command {
    Submit(ScoreSubmission),
    Refresh,
}

/// Result reported back from the worker thread.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LeaderboardUpdate {
    Entries(Vec<LeaderboardEntry>),
    Submitted(LeaderboardEntry),
    Failed(String),
}

/// Fire-and-forget front for a [`ScoreBoard`] running on its own thread.
///
/// Calls never block the caller. Results arrive through [`Self::poll`]; a
/// failed query keeps the last list that loaded successfully.
#[derive(Debug)]
pub struct LeaderboardClient {
    commands: Option<Sender<Command>>,
    updates: Receiver<LeaderboardUpdate>,
    worker: Option<JoinHandle<()>>,
    entries: Vec<LeaderboardEntry>,
    last_error: Option<String>,
}

impl LeaderboardClient {
    /// Starts the worker and queues the initial refresh.
    pub fn spawn(board: Box<dyn ScoreBoard>, limit: usize) -> io::Result<Self> {
        let (command_tx, command_rx) = mpsc::channel();
        let (update_tx, update_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("leaderboard".to_owned())
            .spawn(move || run_worker(board, limit, &command_rx, &update_tx))?;

        let client = Self {
            commands: Some(command_tx),
            updates: update_rx,
            worker: Some(worker),
            entries: Vec::new(),
            last_error: None,
        };
        client.refresh();
        Ok(client)
    }

    /// Queues a score submission, followed by a refresh.
    pub fn submit(&self, submission: ScoreSubmission) {
        self.send(Command::Submit(submission));
    }

    /// Queues a refresh of the top scores.
    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    /// Applies every update that has arrived. Returns true if any did.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.updates.try_recv() {
                Ok(update) => {
                    self.apply(update);
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return changed,
            }
        }
    }

    /// Waits up to `timeout` for one update and applies it.
    pub fn poll_timeout(&mut self, timeout: Duration) -> Result<(), LeaderboardError> {
        match self.updates.recv_timeout(timeout) {
            Ok(update) => {
                self.apply(update);
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => Ok(()),
            Err(RecvTimeoutError::Disconnected) => Err(LeaderboardError::Disconnected),
        }
    }

    /// Last successfully loaded ranking.
    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn apply(&mut self, update: LeaderboardUpdate) {
        match update {
            LeaderboardUpdate::Entries(entries) => {
                self.entries = entries;
                self.last_error = None;
            }
            LeaderboardUpdate::Submitted(_) => {}
            LeaderboardUpdate::Failed(message) => self.last_error = Some(message),
        }
    }

    fn send(&self, command: Command) {
        let Some(commands) = &self.commands else {
            return;
        };
        if commands.send(command).is_err() {
            warn!("leaderboard worker is gone; dropping request");
        }
    }
}

impl Drop for LeaderboardClient {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once queued work is done.
        self.commands.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("leaderboard worker panicked");
            }
        }
    }
}

fn run_worker(
    mut board: Box<dyn ScoreBoard>,
    limit: usize,
    commands: &Receiver<Command>,
    updates: &Sender<LeaderboardUpdate>,
) {
    for command in commands {
        match command {
            Command::Submit(ScoreSubmission { player, score }) => {
                match board.submit(&player, score) {
                    Ok(entry) => {
                        info!("submitted score {} for {}", entry.score, entry.player);
                        let _ = updates.send(LeaderboardUpdate::Submitted(entry));
                    }
                    Err(e) => {
                        error!("failed to submit score {score} for {player:?}: {e}");
                        let _ = updates.send(LeaderboardUpdate::Failed(e.to_string()));
                    }
                }
                refresh(board.as_ref(), limit, updates);
            }
            Command::Refresh => refresh(board.as_ref(), limit, updates),
        }
    }
    debug!("leaderboard worker stopped");
}

fn refresh(board: &dyn ScoreBoard, limit: usize, updates: &Sender<LeaderboardUpdate>) {
    let update = match board.top_scores(limit) {
        Ok(entries) => LeaderboardUpdate::Entries(entries),
        Err(e) => {
            warn!("failed to fetch leaderboard: {e}");
            LeaderboardUpdate::Failed(e.to_string())
        }
    };
    let _ = updates.send(update);
}
