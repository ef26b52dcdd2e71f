//! Best-effort transactional email.

use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Username;
use tracing::{debug, info, warn};

use crate::error::NotifyError;

mod sendgrid;

pub use sendgrid::{MailConfig, SendGridNotifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Account lifecycle events that trigger an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    SignedUp(Username),
    LoggedIn(Username),
}

impl AccountEvent {
    #[must_use]
    pub fn username(&self) -> &Username {
        match self {
            AccountEvent::SignedUp(name) | AccountEvent::LoggedIn(name) => name,
        }
    }

    fn message(&self) -> EmailMessage {
        let name = self.username();
        let (subject, body) = match self {
            AccountEvent::SignedUp(_) => (
                "Welcome to NumberNinja".to_owned(),
                format!("Hi {name}, your account is ready. Pick a grade and start practising!"),
            ),
            AccountEvent::LoggedIn(_) => (
                "New NumberNinja login".to_owned(),
                format!("Hi {name}, you just logged in. Keep that streak going!"),
            ),
        };
        EmailMessage {
            to: name.to_string(),
            subject,
            body,
        }
    }
}

/// Delivery backend.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` when delivery fails or mail is not configured.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;

    /// Address used as sender and as the target of test emails.
    fn default_sender(&self) -> Option<&str>;
}

/// Used when no mail credentials are configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _message: &EmailMessage) -> Result<(), NotifyError> {
        Err(NotifyError::Disabled)
    }

    fn default_sender(&self) -> Option<&str> {
        None
    }
}

/// Fire-and-forget notifications; failures are logged and swallowed.
#[derive(Clone)]
pub struct NotificationService {
    notifier: Arc<dyn Notifier>,
}

impl NotificationService {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledNotifier))
    }

    /// SendGrid when configured, disabled otherwise.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: Option<MailConfig>) -> Result<Self, NotifyError> {
        match config {
            Some(config) => Ok(Self::new(Arc::new(SendGridNotifier::new(config)?))),
            None => Ok(Self::disabled()),
        }
    }

    /// Email the user about an account event, if their username is an address.
    ///
    /// Never fails; delivery problems are logged.
    pub async fn account_event(&self, event: AccountEvent) {
        if !event.username().looks_like_email() {
            debug!(username = %event.username(), "skipping account email: no address");
            return;
        }
        let message = event.message();
        match self.notifier.send(&message).await {
            Ok(()) => info!(to = %message.to, subject = %message.subject, "account email sent"),
            Err(NotifyError::Disabled) => {
                debug!(to = %message.to, "skipping account email: mail disabled");
            }
            Err(e) => warn!(to = %message.to, error = %e, "failed to send account email"),
        }
    }

    /// Send a test message to the default sender address.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` so the caller can show what went wrong.
    pub async fn send_test(&self) -> Result<(), NotifyError> {
        let to = self
            .notifier
            .default_sender()
            .ok_or(NotifyError::Disabled)?
            .to_owned();
        if to.is_empty() {
            return Err(NotifyError::MissingRecipient);
        }
        let message = EmailMessage {
            to,
            subject: "Test Email from NumberNinja".into(),
            body: "This is a test email from your NumberNinja server!".into(),
        };
        self.notifier.send(&message).await.inspect_err(|e| {
            warn!(error = %e, "test email failed");
        })
    }
}
