use std::sync::Arc;

use quiz_core::model::{User, UserError, Username};
use storage::repository::{StorageError, UserRepository};
use tokio::task;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::AuthError;
use crate::password::{PasswordCheck, Passwords};

/// Signup and login against the user store.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    passwords: Passwords,
}

impl AuthService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self {
            clock,
            users,
            passwords: Passwords::default(),
        }
    }

    #[must_use]
    pub fn with_passwords(mut self, passwords: Passwords) -> Self {
        self.passwords = passwords;
        self
    }

    /// Create a new account from raw form input.
    ///
    /// The username is trimmed and lower-cased, the password trimmed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Invalid` for blank input, `AuthError::UsernameTaken`
    /// if the name is in use (the existing record is left untouched), and
    /// `AuthError::Storage`/`AuthError::Hashing` for internal failures.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username)?;
        let password = password.trim();
        if password.is_empty() {
            return Err(UserError::EmptyPassword.into());
        }

        if self.users.get_user(&username).await?.is_some() {
            debug!(%username, "signup rejected: username taken");
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(username, self.hash_password(password).await?);
        match self.users.insert_user(&user).await {
            Ok(()) => {}
            Err(StorageError::Conflict) => return Err(AuthError::UsernameTaken),
            Err(e) => return Err(e.into()),
        }

        info!(username = %user.username(), "user signed up");
        Ok(user)
    }

    /// Verify credentials and record today's login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown user or wrong
    /// password, `AuthError::Storage` if the store fails, and
    /// `AuthError::Hashing` if a legacy hash cannot be upgraded.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Err(AuthError::InvalidCredentials);
        };
        let password = password.trim();

        let Some(mut user) = self.users.get_user(&username).await? else {
            debug!(%username, "login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };
        match self.check_password(password, user.password_hash()).await {
            PasswordCheck::Match => {}
            PasswordCheck::MatchNeedsRehash => {
                let upgraded = self.hash_password(password).await?;
                user.replace_password_hash(upgraded);
                info!(%username, "upgraded legacy password hash");
            }
            PasswordCheck::Mismatch => {
                debug!(%username, "login rejected: bad password");
                return Err(AuthError::InvalidCredentials);
            }
        }

        user.record_login(self.clock.today());
        self.users.upsert_user(&user).await?;

        info!(username = %user.username(), streak = user.streak(), "user logged in");
        Ok(user)
    }

    /// Look up the user a session refers to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the store fails.
    pub async fn current_user(&self, username: &str) -> Result<Option<User>, AuthError> {
        let Ok(username) = Username::parse(username) else {
            return Ok(None);
        };
        Ok(self.users.get_user(&username).await?)
    }

    // Key derivation is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let passwords = self.passwords.clone();
        let password = password.to_string();
        task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    async fn check_password(&self, password: &str, hash: &str) -> PasswordCheck {
        let passwords = self.passwords.clone();
        let (password, hash) = (password.to_string(), hash.to_string());
        match task::spawn_blocking(move || passwords.check(&password, &hash)).await {
            Ok(check) => check,
            Err(e) => {
                warn!(error = %e, "password check task failed");
                PasswordCheck::Mismatch
            }
        }
    }
}
