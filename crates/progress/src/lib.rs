//! Progress module - finished-game records and per-user aggregates
//!
//! The store keeps every [`GameRecord`] it is given and folds each one into
//! the owning user's [`UserProgress`]:
//!
//! - `gamesPlayed` goes up by one
//! - `totalScore` grows by the record's score
//! - `highestLevel` is raised to the record's level if that is higher
//! - `bestTime` is lowered to the record's time if that is faster (the first
//!   record always sets it)
//!
//! Only registered users have progress; records for unknown users are still
//! stored and show up on the leaderboard.
//!
//! Users are either registered by bare id ([`ProgressStore::register`]) or
//! created as named accounts ([`ProgressStore::create_user`]), which get the
//! next free id and unique usernames. No credentials are kept.
//!
//! Everything lives in memory. [`ProgressStore`] is the seam for a durable
//! backend.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use chem_sort_types::GameRecord;
use chem_sort_types::{DEFAULT_TOP_SCORES, FIRST_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("user {0} is already registered")]
    DuplicateUser(u64),
    #[error("username {0} is already taken")]
    DuplicateUsername(String),
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("invalid game record: {0}")]
    InvalidRecord(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: u64,
    pub highest_level: u32,
    pub total_score: u64,
    pub games_played: u32,
    /// Fastest game in seconds
    pub best_time: Option<u32>,
}

impl UserProgress {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            highest_level: FIRST_LEVEL,
            total_score: 0,
            games_played: 0,
            best_time: None,
        }
    }

    /// Fold one finished game into the aggregate
    pub fn apply(&mut self, record: &GameRecord) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(u64::from(record.score));
        self.highest_level = self.highest_level.max(record.level);
        self.best_time = Some(match self.best_time {
            Some(best) => best.min(record.time_elapsed),
            None => record.time_elapsed,
        });
    }
}

/// A named player account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

/// A stored record with its store-assigned id (ids increase with every save)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScore {
    pub id: u64,
    #[serde(flatten)]
    pub record: GameRecord,
}

/// Record validation applied before anything is stored
pub fn validate_record(record: &GameRecord) -> Result<(), StoreError> {
    if record.level == 0 {
        return Err(StoreError::InvalidRecord("level must be at least 1"));
    }
    if record.moves_used > record.max_moves {
        return Err(StoreError::InvalidRecord("moves used exceed the move budget"));
    }
    Ok(())
}

pub trait ProgressStore {
    /// Create fresh progress for a new user
    fn register(&mut self, user_id: u64) -> Result<UserProgress, StoreError>;

    /// Create a named account with the next free id and fresh progress
    fn create_user(&mut self, username: &str) -> Result<User, StoreError>;

    fn user(&self, user_id: u64) -> Option<User>;

    fn user_by_username(&self, username: &str) -> Option<User>;

    /// Store a finished game and update the user's progress
    fn save_score(&mut self, record: GameRecord) -> Result<StoredScore, StoreError>;

    /// A user's games, newest first
    fn user_scores(&self, user_id: u64) -> Vec<StoredScore>;

    /// Best games across all users, highest score first
    ///
    /// A `limit` of 0 means [`DEFAULT_TOP_SCORES`].
    fn top_scores(&self, limit: usize) -> Vec<StoredScore>;

    fn progress(&self, user_id: u64) -> Option<UserProgress>;

    /// Leaderboard with the default length
    fn leaderboard(&self) -> Vec<StoredScore> {
        self.top_scores(DEFAULT_TOP_SCORES)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: Vec<StoredScore>,
    progress: HashMap<u64, UserProgress>,
    users: Vec<User>,
    next_id: u64,
    next_user_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn register(&mut self, user_id: u64) -> Result<UserProgress, StoreError> {
        if self.progress.contains_key(&user_id) {
            return Err(StoreError::DuplicateUser(user_id));
        }
        let progress = UserProgress::new(user_id);
        self.progress.insert(user_id, progress.clone());
        log::debug!("registered user {}", user_id);
        Ok(progress)
    }

    fn create_user(&mut self, username: &str) -> Result<User, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::EmptyUsername);
        }
        if self.user_by_username(username).is_some() {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        // Skip ids already taken through `register`.
        self.next_user_id += 1;
        while self.progress.contains_key(&self.next_user_id) {
            self.next_user_id += 1;
        }

        let user = User {
            id: self.next_user_id,
            username: username.to_string(),
            created_at: unix_now(),
        };
        self.register(user.id)?;
        self.users.push(user.clone());
        log::debug!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    fn user(&self, user_id: u64) -> Option<User> {
        self.users.iter().find(|u| u.id == user_id).cloned()
    }

    fn user_by_username(&self, username: &str) -> Option<User> {
        self.users.iter().find(|u| u.username == username).cloned()
    }

    fn save_score(&mut self, record: GameRecord) -> Result<StoredScore, StoreError> {
        validate_record(&record)?;

        self.next_id += 1;
        let stored = StoredScore {
            id: self.next_id,
            record,
        };

        match self.progress.get_mut(&stored.record.user_id) {
            Some(progress) => progress.apply(&stored.record),
            None => log::debug!(
                "score {} saved for unregistered user {}",
                stored.id,
                stored.record.user_id
            ),
        }

        self.scores.push(stored.clone());
        Ok(stored)
    }

    fn user_scores(&self, user_id: u64) -> Vec<StoredScore> {
        self.scores
            .iter()
            .rev()
            .filter(|s| s.record.user_id == user_id)
            .cloned()
            .collect()
    }

    fn top_scores(&self, limit: usize) -> Vec<StoredScore> {
        let limit = if limit == 0 { DEFAULT_TOP_SCORES } else { limit };
        let mut top = self.scores.clone();
        // Stable sort: equal scores keep save order.
        top.sort_by(|a, b| b.record.score.cmp(&a.record.score));
        top.truncate(limit);
        top
    }

    fn progress(&self, user_id: u64) -> Option<UserProgress> {
        self.progress.get(&user_id).cloned()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
