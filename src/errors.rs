//! The single error type that crosses the service/route boundary.
//!
//! Lower-level store errors (`sqlx::Error`, `reqwest::Error`) are wrapped
//! into this at the service boundary, the same adaptation the store-specific
//! error enums in `services` perform before a route handler ever sees them.

use crate::models::responses::ErrorResponse;
use crate::services::action_ledger::ActionLedgerError;
use crate::services::mutual_match::MutualMatchError;
use actix_web::{http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchmakingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl MatchmakingError {
    fn code(&self) -> &'static str {
        match self {
            MatchmakingError::InvalidArgument(_) => "INVALID_ARGUMENT",
            MatchmakingError::NotFound(_) => "NOT_FOUND",
            MatchmakingError::AlreadyExists(_) => "ALREADY_EXISTS",
            MatchmakingError::Unavailable(_) => "UNAVAILABLE",
            MatchmakingError::Internal(_) => "INTERNAL",
        }
    }
}

impl From<sqlx::Error> for MatchmakingError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => MatchmakingError::NotFound("row not found".to_string()),
            other => MatchmakingError::Unavailable(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for MatchmakingError {
    fn from(err: reqwest::Error) -> Self {
        MatchmakingError::Unavailable(err.to_string())
    }
}

impl From<redis::RedisError> for MatchmakingError {
    fn from(err: redis::RedisError) -> Self {
        MatchmakingError::Unavailable(err.to_string())
    }
}

impl From<ActionLedgerError> for MatchmakingError {
    fn from(err: ActionLedgerError) -> Self {
        match err {
            ActionLedgerError::Sqlx(e) => e.into(),
            ActionLedgerError::Migrate(e) => MatchmakingError::Unavailable(e.to_string()),
        }
    }
}

impl From<MutualMatchError> for MatchmakingError {
    fn from(err: MutualMatchError) -> Self {
        match err {
            MutualMatchError::Sqlx(e) => e.into(),
        }
    }
}

impl actix_web::error::ResponseError for MatchmakingError {
    fn status_code(&self) -> StatusCode {
        match self {
            MatchmakingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            MatchmakingError::NotFound(_) => StatusCode::NOT_FOUND,
            MatchmakingError::AlreadyExists(_) => StatusCode::CONFLICT,
            MatchmakingError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            MatchmakingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "matchmaking request failed");
        } else {
            tracing::warn!(error = %self, "matchmaking request rejected");
        }
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}
