use std::sync::Arc;

use quiz_core::model::{Badge, GradeProgress, GradeTier, Username};
use storage::repository::UserRepository;

use crate::error::ProgressError;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub username: String,
    /// Overall score percentage across every grade, `0..=100`.
    pub score: u8,
    pub streak: u32,
    pub badges: Vec<Badge>,
}

/// One row of the progress table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRow {
    pub grade: GradeTier,
    pub counts: GradeProgress,
    pub percent: u8,
}

/// Per-grade breakdown for the progress page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub username: String,
    pub rows: Vec<GradeRow>,
    pub score: u8,
}

/// Read-only aggregation over a user's stored progress.
#[derive(Clone)]
pub struct ProgressService {
    users: Arc<dyn UserRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Summary shown on the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownUser` if the user is gone, or
    /// `ProgressError::Storage` if the store fails.
    pub async fn dashboard(&self, username: &Username) -> Result<DashboardStats, ProgressError> {
        let user = self
            .users
            .get_user(username)
            .await?
            .ok_or(ProgressError::UnknownUser)?;

        Ok(DashboardStats {
            username: user.username().to_string(),
            score: user.progress().overall_percent(),
            streak: user.streak(),
            badges: user.badges().to_vec(),
        })
    }

    /// Per-grade counts in grade order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownUser` if the user is gone, or
    /// `ProgressError::Storage` if the store fails.
    pub async fn report(&self, username: &Username) -> Result<ProgressReport, ProgressError> {
        let user = self
            .users
            .get_user(username)
            .await?
            .ok_or(ProgressError::UnknownUser)?;

        let rows = user
            .progress()
            .iter()
            .map(|(grade, counts)| GradeRow {
                grade,
                counts,
                percent: counts.percent(),
            })
            .collect();

        Ok(ProgressReport {
            username: user.username().to_string(),
            rows,
            score: user.progress().overall_percent(),
        })
    }
}
