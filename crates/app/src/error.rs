use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use services::{AuthError, ProgressError, QuizError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl AppError {
    fn user_vanished(&self) -> bool {
        matches!(
            self,
            AppError::Quiz(QuizError::UnknownUser) | AppError::Progress(ProgressError::UnknownUser)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // deleted between the session check and the service call
        if self.user_vanished() {
            return Redirect::to("/login").into_response();
        }
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
