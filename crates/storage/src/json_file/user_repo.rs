use quiz_core::model::{User, Username};
use tracing::warn;

use super::JsonFileRepository;
use super::document;
use crate::repository::{StorageError, UserRecord, UserRepository};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait::async_trait]
impl UserRepository for JsonFileRepository {
    async fn get_user(&self, username: &Username) -> Result<Option<User>, StorageError> {
        let mut doc = document::load(&self.path).await?;
        let Some(value) = doc.remove(username.as_str()) else {
            return Ok(None);
        };
        let record: UserRecord = serde_json::from_value(value).map_err(|e| {
            warn!(%username, error = %e, "unreadable user record");
            ser(e)
        })?;
        record.into_user(username.as_str()).map(Some).map_err(ser)
    }

    async fn insert_user(&self, user: &User) -> Result<(), StorageError> {
        let key = user.username().as_str().to_owned();
        let record = serde_json::to_value(UserRecord::from_user(user)).map_err(ser)?;
        self.modify(move |doc| {
            if doc.contains_key(&key) {
                return Err(StorageError::Conflict);
            }
            doc.insert(key, record);
            Ok(())
        })
        .await
    }

    async fn upsert_user(&self, user: &User) -> Result<(), StorageError> {
        let key = user.username().as_str().to_owned();
        let record = serde_json::to_value(UserRecord::from_user(user)).map_err(ser)?;
        self.modify(move |doc| {
            doc.insert(key, record);
            Ok(())
        })
        .await
    }
}
