use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{EmailMessage, Notifier};
use crate::error::NotifyError;

const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub base_url: String,
    pub api_key: String,
    pub sender: String,
}

impl MailConfig {
    /// Reads `SENDGRID_API_KEY` and `MAIL_DEFAULT_SENDER`; both must be non-empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("SENDGRID_API_KEY").ok()?;
        let sender = env::var("MAIL_DEFAULT_SENDER").ok()?;
        Self::new(api_key, sender)
    }

    #[must_use]
    pub fn new(api_key: String, sender: String) -> Option<Self> {
        if api_key.trim().is_empty() || sender.trim().is_empty() {
            return None;
        }
        let base_url = env::var("SENDGRID_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Some(Self {
            base_url,
            api_key,
            sender,
        })
    }
}

/// Sends mail through the SendGrid v3 HTTP API.
#[derive(Clone)]
pub struct SendGridNotifier {
    client: Client,
    config: MailConfig,
}

impl SendGridNotifier {
    /// # Errors
    ///
    /// Returns `NotifyError::Http` if the HTTP client cannot be built.
    pub fn new(config: MailConfig) -> Result<Self, NotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Notifier for SendGridNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let url = format!("{}/v3/mail/send", self.config.base_url.trim_end_matches('/'));
        let payload = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &message.to,
                }],
            }],
            from: Address {
                email: &self.config.sender,
            },
            subject: &message.subject,
            content: vec![Content {
                kind: "text/plain",
                value: &message.body,
            }],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status()));
        }
        Ok(())
    }

    fn default_sender(&self) -> Option<&str> {
        Some(&self.config.sender)
    }
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_disable_mail() {
        assert!(MailConfig::new(String::new(), "a@b.co".into()).is_none());
        assert!(MailConfig::new("key".into(), "  ".into()).is_none());
        assert!(MailConfig::new("key".into(), "a@b.co".into()).is_some());
    }

    #[test]
    fn payload_matches_v3_shape() {
        let payload = MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![Address { email: "kid@example.com" }],
            }],
            from: Address {
                email: "noreply@example.com",
            },
            subject: "Hi",
            content: vec![Content {
                kind: "text/plain",
                value: "Body",
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["personalizations"][0]["to"][0]["email"], "kid@example.com");
        assert_eq!(json["from"]["email"], "noreply@example.com");
        assert_eq!(json["content"][0]["type"], "text/plain");
    }
}
