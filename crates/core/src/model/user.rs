use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{GradeTier, Progress};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("username is required")]
    EmptyUsername,

    #[error("username is too long ({len} > {max} characters)")]
    UsernameTooLong { len: usize, max: usize },

    #[error("password is required")]
    EmptyPassword,

    #[error("invalid persisted user state: {0}")]
    InvalidPersistedState(String),
}

//
// ─── USERNAME ─────────────────────────────────────────────────────────────────
//

/// Normalized store key: trimmed and lower-cased.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub const MAX_LEN: usize = 64;

    /// Normalizes raw form input into a username.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmptyUsername` for blank input and
    /// `UserError::UsernameTooLong` past [`Username::MAX_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, UserError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        let len = normalized.chars().count();
        if len > Self::MAX_LEN {
            return Err(UserError::UsernameTooLong {
                len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(normalized))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort check for whether the username can receive mail.
    #[must_use]
    pub fn looks_like_email(&self) -> bool {
        match self.0.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        }
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── STREAK ───────────────────────────────────────────────────────────────────
//

/// Streak after a login on `today`.
///
/// - first login ever: 1
/// - previous login exactly one day earlier: `current + 1`
/// - previous login today (or later): unchanged
/// - any larger gap: 1
#[must_use]
pub fn next_streak(current: u32, last_login: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(last) = last_login else {
        return 1;
    };
    match last.succ_opt() {
        Some(next_day) if next_day == today => current.saturating_add(1),
        Some(next_day) if next_day < today => 1,
        _ => current,
    }
}

//
// ─── BADGE ────────────────────────────────────────────────────────────────────
//

/// Cosmetic milestone label, e.g. `grade3 Badge #2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Badge(String);

impl Badge {
    /// Label for the `number`-th badge earned, attributed to `grade`.
    #[must_use]
    pub fn for_grade(grade: GradeTier, number: usize) -> Self {
        Self(format!("{grade} Badge #{number}"))
    }

    #[must_use]
    pub fn from_persisted(label: String) -> Self {
        Self(label)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// Badges are awarded every fifth cumulative correct answer within a tier.
pub const BADGE_INTERVAL: u32 = 5;

//
// ─── USER ─────────────────────────────────────────────────────────────────────
//

/// A registered quiz player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    username: Username,
    password_hash: String,
    progress: Progress,
    streak: u32,
    badges: Vec<Badge>,
    last_login: Option<NaiveDate>,
}

impl User {
    /// A freshly signed-up user: zeroed progress, no streak, no badges.
    #[must_use]
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            progress: Progress::default(),
            streak: 0,
            badges: Vec::new(),
            last_login: None,
        }
    }

    /// Rehydrate a user from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `UserError::InvalidPersistedState` if the stored hash is empty.
    pub fn from_persisted(
        username: Username,
        password_hash: String,
        progress: Progress,
        streak: u32,
        badges: Vec<Badge>,
        last_login: Option<NaiveDate>,
    ) -> Result<Self, UserError> {
        if password_hash.is_empty() {
            return Err(UserError::InvalidPersistedState(format!(
                "user {username} has no password hash"
            )));
        }
        Ok(Self {
            username,
            password_hash,
            progress,
            streak,
            badges,
            last_login,
        })
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    #[must_use]
    pub fn last_login(&self) -> Option<NaiveDate> {
        self.last_login
    }

    /// Swaps in a freshly computed hash, e.g. after upgrading an older scheme.
    pub fn replace_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
    }

    /// Applies the streak rule and stamps `today` as the last login.
    pub fn record_login(&mut self, today: NaiveDate) {
        self.streak = next_streak(self.streak, self.last_login, today);
        self.last_login = Some(today);
    }

    /// Awards a badge when the cumulative correct count for `grade`
    /// (persisted plus `session_correct`) lands on a multiple of [`BADGE_INTERVAL`].
    ///
    /// Returns the new badge, if any.
    pub fn award_badge_if_due(&mut self, grade: GradeTier, session_correct: u32) -> Option<&Badge> {
        let cumulative = self.progress.get(grade).correct.saturating_add(session_correct);
        if cumulative == 0 || cumulative % BADGE_INTERVAL != 0 {
            return None;
        }
        let badge = Badge::for_grade(grade, self.badges.len() + 1);
        self.badges.push(badge);
        self.badges.last()
    }

    /// Folds a finished quiz into the per-grade counters.
    pub fn record_quiz(&mut self, grade: GradeTier, correct: u32, attempts: u32) {
        self.progress.record(grade, correct, attempts);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
