//! Runtime configuration: environment first, command-line flags on top.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use services::{MailConfig, StorageBackend};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_SECRET: &str = "default-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {raw:?}: {reason}")]
    Invalid {
        key: &'static str,
        raw: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub secret_key: String,
    pub backend: StorageBackend,
    pub mail: Option<MailConfig>,
}

impl Config {
    /// Reads `PORT`, `SECRET_KEY`, `QUIZ_USERS_FILE` and the mail variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = try_load("PORT", "5000")?;
        let users_file: PathBuf = try_load("QUIZ_USERS_FILE", "users.json")?;
        let secret_key = match env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("SECRET_KEY not set, sessions are signed with the built-in default");
                DEFAULT_SECRET.to_owned()
            }
        };
        let mail = MailConfig::from_env();
        if mail.is_none() {
            info!("SENDGRID_API_KEY or MAIL_DEFAULT_SENDER not set, email disabled");
        }

        Ok(Self {
            port,
            secret_key,
            backend: StorageBackend::JsonFile(users_file),
            mail,
        })
    }

    /// Applies `--port`, `--users-file` and `--in-memory` overrides.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags or bad values.
    pub fn apply_args(
        mut self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--port" => {
                    let value = require_value(args, "--port")?;
                    self.port = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPort { raw: value.clone() })?;
                }
                "--users-file" => {
                    let value = require_value(args, "--users-file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidUsersFile { raw: value });
                    }
                    self.backend = StorageBackend::JsonFile(PathBuf::from(value));
                }
                "--in-memory" => self.backend = StorageBackend::InMemory,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_owned()
    });
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        raw,
    })
}

// ─── COMMAND LINE ───

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidPort { raw: String },
    InvalidUsersFile { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidUsersFile { raw } => write!(f, "invalid --users-file value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Help,
}

impl Command {
    /// Splits off the subcommand; bare flags mean `serve`.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError::UnknownCommand` for anything other than `serve`.
    pub fn parse(argv: Vec<String>) -> Result<(Self, Vec<String>), ArgsError> {
        let mut argv = argv;
        match argv.first().map(String::as_str) {
            None => Ok((Self::Serve, argv)),
            Some("--help" | "-h" | "help") => Ok((Self::Help, Vec::new())),
            Some(first) if first.starts_with("--") => Ok((Self::Serve, argv)),
            Some("serve") => {
                argv.remove(0);
                if argv.iter().any(|arg| arg == "--help" || arg == "-h") {
                    return Ok((Self::Help, Vec::new()));
                }
                Ok((Self::Serve, argv))
            }
            Some(other) => Err(ArgsError::UnknownCommand(other.to_owned())),
        }
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [serve] [--port <n>] [--users-file <path>] [--in-memory]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PORT (5000), SECRET_KEY, QUIZ_USERS_FILE (users.json)");
    eprintln!("  SENDGRID_API_KEY, MAIL_DEFAULT_SENDER, RUST_LOG (info)");
}
