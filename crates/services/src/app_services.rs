use std::path::PathBuf;
use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::notifications::{MailConfig, NotificationService};
use crate::progress_service::ProgressService;
use crate::quiz::QuizService;

/// Where user records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local map; everything is lost on restart.
    InMemory,
    JsonFile(PathBuf),
}

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    quiz: Arc<QuizService>,
    progress: Arc<ProgressService>,
    notifications: Arc<NotificationService>,
}

impl AppServices {
    /// Build services for the given backend and mail settings.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the store cannot be opened or the mail client cannot be built.
    pub async fn build(
        backend: &StorageBackend,
        clock: Clock,
        mail: Option<MailConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = match backend {
            StorageBackend::InMemory => Storage::in_memory(),
            StorageBackend::JsonFile(path) => Storage::json_file(path.clone()).await?,
        };
        let mail_enabled = mail.is_some();
        let notifications = NotificationService::from_config(mail)?;
        info!(?backend, mail_enabled, "services ready");
        Ok(Self::from_storage(&storage, clock, notifications))
    }

    /// Wire services over an already-built storage.
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, notifications: NotificationService) -> Self {
        Self {
            auth: Arc::new(AuthService::new(clock, Arc::clone(&storage.users))),
            quiz: Arc::new(QuizService::new(Arc::clone(&storage.users))),
            progress: Arc::new(ProgressService::new(Arc::clone(&storage.users))),
            notifications: Arc::new(notifications),
        }
    }

    /// Replace the auth service, e.g. to use cheaper password hashing.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthService) -> Self {
        self.auth = Arc::new(auth);
        self
    }

    /// Replace the quiz service, e.g. to shorten batches.
    #[must_use]
    pub fn with_quiz(mut self, quiz: QuizService) -> Self {
        self.quiz = Arc::new(quiz);
        self
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn notifications(&self) -> Arc<NotificationService> {
        Arc::clone(&self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_backend_builds() {
        let services = AppServices::build(&StorageBackend::InMemory, fixed_clock(), None)
            .await
            .unwrap();
        assert_eq!(services.quiz().batch_size(), quiz_core::generator::QUIZ_LENGTH);
    }
}
