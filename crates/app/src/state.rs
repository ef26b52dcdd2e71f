use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use services::AppServices;

use crate::session::signing_key;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub services: AppServices,
    key: Key,
}

impl AppState {
    #[must_use]
    pub fn new(services: AppServices, secret: &str) -> Self {
        Self {
            services,
            key: signing_key(secret),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
