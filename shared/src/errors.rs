//! Error types for the appointment booking application

use crate::models::Role;
use thiserror::Error;

/// Authentication and authorization failures
///
/// The token variants are distinct for logging only; callers see them as
/// a single unauthorized outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing token")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    #[error("Role '{required}' required")]
    Forbidden { required: Role },
}

/// Appointment repository failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Appointment {0} already exists")]
    DuplicateId(i64),

    #[error("Appointment {0} not found")]
    NotFound(i64),
}
