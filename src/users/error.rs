use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views::ViewError;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("user not found")]
    NotFound,
    #[error("store error: {0:#}")]
    Persistence(anyhow::Error),
    #[error("password hashing failed: {0:#}")]
    Hash(anyhow::Error),
    #[error(transparent)]
    View(#[from] ViewError),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::NotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            other => {
                error!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
