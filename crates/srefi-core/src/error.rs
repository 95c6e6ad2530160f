use thiserror::Error;

/// Unified error type for the srefi domain.
#[derive(Error, Debug)]
pub enum SrefiError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Submission already stored for this session")]
    AlreadySubmitted,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SrefiError>;

impl SrefiError {
    pub fn auth(msg: impl Into<String>) -> Self {
        SrefiError::Auth(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SrefiError::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        SrefiError::Internal(msg.into())
    }
}

impl From<anyhow::Error> for SrefiError {
    fn from(err: anyhow::Error) -> Self {
        SrefiError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SrefiError {
    fn from(err: tokio::task::JoinError) -> Self {
        SrefiError::Internal(err.to_string())
    }
}
