use thiserror::Error;

use models::errors::ModelError;

/// Business errors for user management and authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("username already taken")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("user does not exist")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::UserNotFound => 1004,
            AuthError::InvalidCredentials => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => AuthError::Validation(msg),
            ModelError::Db(msg) => AuthError::Repository(msg),
        }
    }
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(e: sea_orm::DbErr) -> Self { AuthError::Repository(e.to_string()) }
}
