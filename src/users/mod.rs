use crate::state::AppState;
use axum::{
    routing::{get, MethodRouter},
    Router,
};

mod dto;
pub mod error;
pub mod handlers;
#[cfg(test)]
pub(crate) mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod validation;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}

/// List and create, served at the mount root with or without a trailing slash.
pub fn list_routes() -> MethodRouter<AppState> {
    get(handlers::list_users).post(handlers::create_user)
}
