use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::repository::{Storage, StorageError, UserRepository};

mod document;
mod user_repo;

/// User store backed by a single JSON file, rewritten wholesale on every change.
///
/// Load-modify-save cycles are serialized inside this process; other
/// processes writing the same file are not coordinated with.
#[derive(Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JsonFileInitError {
    #[error("failed to prepare {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("existing store is unreadable: {0}")]
    Unreadable(#[from] StorageError),
}

impl JsonFileRepository {
    /// Open the store at `path`, creating parent directories if needed.
    ///
    /// The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns `JsonFileInitError` if the parent directory cannot be created or
    /// an existing file does not parse.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, JsonFileInitError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| JsonFileInitError::Prepare {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let existing = document::load(&path).await?;
        info!(path = %path.display(), users = existing.len(), "opened user store");

        Ok(Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `apply` against the loaded document and saves it if `apply` succeeds.
    async fn modify<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut document::UserDocument) -> Result<(), StorageError> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = document::load(&self.path).await?;
        apply(&mut doc)?;
        document::save(&self.path, &doc).await?;
        debug!(path = %self.path.display(), users = doc.len(), "saved user store");
        Ok(())
    }
}

impl Storage {
    /// Build a `Storage` backed by a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `JsonFileInitError` if the store cannot be opened.
    pub async fn json_file(path: impl Into<PathBuf>) -> Result<Self, JsonFileInitError> {
        let repo = JsonFileRepository::open(path).await?;
        let users: Arc<dyn UserRepository> = Arc::new(repo);
        Ok(Self { users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonFileRepository>();
    }
}
