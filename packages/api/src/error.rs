//! Errors raised by the server-side implementation of the server functions.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Not authorized")]
    Forbidden,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("{0}")]
    Password(String),
}

/// Map any server error onto the server function error type.
pub fn server_fn_error(e: impl std::fmt::Display) -> dioxus::prelude::ServerFnError {
    dioxus::prelude::ServerFnError::new(e.to_string())
}
