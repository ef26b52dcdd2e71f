//! HTTP front end for NumberNinja.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;

pub use config::{ArgsError, Command, Config, ConfigError};
pub use server::{router, serve};
pub use state::AppState;
