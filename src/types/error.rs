use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // standard web stuffs
    #[error("already exists")]
    AlreadyExists,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,

    // infra things
    #[error(transparent)]
    Db(DbErr),
    #[error(transparent)]
    Telegram(#[from] teloxide::RequestError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Db(_) => "DB_ERROR",
            Self::Telegram(_) => "TELEGRAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn from_db(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(_) = err {
            return AppError::NotFound;
        }
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Related record missing".to_string())
            }
            _ => AppError::Db(err),
        }
    }

    /// Internal failures keep their details in the log, not in the response.
    fn public_message(&self) -> String {
        match self {
            Self::Db(_) | Self::Telegram(_) | Self::Internal(_) => self.kind().to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Db(_) | Self::Telegram(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code())
            .json(ErrorBody { error: self.kind(), message: self.public_message() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_becomes_not_found() {
        let err: AppError = DbErr::RecordNotFound("Item not found".into()).into();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_db_errors_stay_internal() {
        let err: AppError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, AppError::Db(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "DB_ERROR");
    }

    #[test]
    fn client_errors_expose_their_message() {
        let err = AppError::Validation("price must not be negative".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "validation error: price must not be negative");
    }
}
