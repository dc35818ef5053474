use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use anyhow::Error;
use serde::Serialize;
use std::fmt::{Display, Formatter};

use crate::ledger::LedgerError;

#[derive(Debug, PartialEq)]
pub enum AppErrorType {
    NotFoundError,
    DbError,
    PayloadValidationError,
    ConflictError,
    LedgerIntegrityError,
    InternalServerError,
}

#[derive(Debug, PartialEq)]
pub struct AppError {
    pub error_type: AppErrorType,
    pub message: Option<String>,
    pub cause: Option<String>,
}

#[derive(Serialize)]
pub struct AppErrorResponse {
    pub success: bool,
    pub message: String,
}

impl AppError {
    pub fn message(&self) -> String {
        match self {
            AppError {
                message: Some(message),
                ..
            } => message.clone(),

            AppError {
                message: None,
                error_type: AppErrorType::NotFoundError,
                ..
            } => "The requested item was not found".to_string(),
            _ => "An unexpected error has occurred".to_string(),
        }
    }

    pub fn db_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::DbError,
            message: Some(error.to_string()),
        }
    }

    pub fn not_found(error: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::NotFoundError,
            message: Some(error.to_string()),
        }
    }

    pub fn bad_request(error: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::PayloadValidationError,
            message: Some(error.to_string()),
        }
    }

    pub fn conflict(error: impl ToString) -> AppError {
        AppError {
            cause: None,
            error_type: AppErrorType::ConflictError,
            message: Some(error.to_string()),
        }
    }

    pub fn internal_error(error: impl ToString) -> AppError {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::InternalServerError,
            message: Some(error.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: Error) -> Self {
        AppError {
            message: None,
            cause: Some(error.to_string()),
            error_type: AppErrorType::InternalServerError,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        AppError {
            cause: Some(error.to_string()),
            error_type: AppErrorType::DbError,
            message: Some(error.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(error: LedgerError) -> Self {
        match error {
            LedgerError::InvalidInput(_) => AppError {
                message: Some(error.to_string()),
                cause: None,
                error_type: AppErrorType::PayloadValidationError,
            },
            LedgerError::InvalidLedgerState { .. } => AppError {
                message: Some("This installment plan's records are inconsistent".to_string()),
                cause: Some(error.to_string()),
                error_type: AppErrorType::LedgerIntegrityError,
            },
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            AppErrorType::DbError
            | AppErrorType::LedgerIntegrityError
            | AppErrorType::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            AppErrorType::NotFoundError => StatusCode::NOT_FOUND,
            AppErrorType::PayloadValidationError => StatusCode::BAD_REQUEST,
            AppErrorType::ConflictError => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(AppErrorResponse {
            success: false,
            message: self.message(),
        })
    }
}

#[derive(Serialize)]
pub struct AppSuccessResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}
