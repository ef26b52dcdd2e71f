use async_trait::async_trait;
use chrono::NaiveDate;
use quiz_core::model::{Badge, GradeProgress, GradeTier, Progress, User, UserError, Username};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Persisted shape for a user, as stored under its username key.
///
/// This mirrors the domain `User` so repositories can serialize/deserialize
/// without leaking storage concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    #[serde(default, deserialize_with = "progress_entries")]
    pub progress: BTreeMap<GradeTier, GradeProgress>,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub last_login: Option<NaiveDate>,
}

impl UserRecord {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            password: user.password_hash().to_owned(),
            progress: user.progress().iter().collect(),
            streak: user.streak(),
            badges: user.badges().iter().map(|b| b.label().to_owned()).collect(),
            last_login: user.last_login(),
        }
    }

    /// Convert the record back into a domain `User`.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the key is not a valid username or the record is incomplete.
    pub fn into_user(self, key: &str) -> Result<User, UserError> {
        let username = Username::parse(key)?;
        User::from_persisted(
            username,
            self.password,
            Progress::from_entries(self.progress),
            self.streak,
            self.badges.into_iter().map(Badge::from_persisted).collect(),
            self.last_login,
        )
    }
}

/// Per-grade counts as found on disk. Older stores kept a bare correct count.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCounts {
    Counts(GradeProgress),
    Bare(u32),
}

/// Reads the progress map, dropping grades that no longer exist.
fn progress_entries<'de, D>(deserializer: D) -> Result<BTreeMap<GradeTier, GradeProgress>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, StoredCounts>::deserialize(deserializer)?;
    let mut progress = BTreeMap::new();
    for (key, counts) in raw {
        let Ok(grade) = key.parse::<GradeTier>() else {
            warn!(grade = %key, "dropping progress for unknown grade");
            continue;
        };
        let counts = match counts {
            StoredCounts::Counts(counts) => counts,
            StoredCounts::Bare(correct) => {
                warn!(%grade, correct, "reading bare progress count as one attempt");
                GradeProgress::new(correct, 1)
            }
        };
        progress.insert(grade, counts);
    }
    Ok(progress)
}

/// Repository contract for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by name.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_user(&self, username: &Username) -> Result<Option<User>, StorageError>;

    /// Persist a brand-new user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is taken; the existing record is untouched.
    async fn insert_user(&self, user: &User) -> Result<(), StorageError>;

    /// Persist or replace a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the user cannot be stored.
    async fn upsert_user(&self, user: &User) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<Mutex<HashMap<Username, User>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, username: &Username) -> Result<Option<User>, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(username).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(user.username()) {
            return Err(StorageError::Conflict);
        }
        guard.insert(user.username().clone(), user.clone());
        Ok(())
    }

    async fn upsert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(user.username().clone(), user.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryRepository::new());
        Self { users }
    }
}
