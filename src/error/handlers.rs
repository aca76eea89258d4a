//! Error handlers
//!
//! Maps storage failures onto HTTP status codes and client-facing messages.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};

use crate::error::types::{ApiError, StorageError, TransferError};

/// Convert a storage error to the HTTP status returned to the client
pub fn error_to_status_code(err: &StorageError) -> StatusCode {
    match err {
        StorageError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        StorageError::Transfer {
            source: TransferError::BodyRead(_),
            ..
        } => StatusCode::BAD_REQUEST,
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::Root { .. }
        | StorageError::CreateDirectory { .. }
        | StorageError::CreateFolder { .. }
        | StorageError::CreateFile { .. }
        | StorageError::OpenFile { .. }
        | StorageError::StatFile { .. }
        | StorageError::ReadDirectory { .. }
        | StorageError::Transfer { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message shown to the client for an internal failure
fn internal_message(err: &StorageError) -> &'static str {
    match err {
        StorageError::CreateDirectory { .. } => "Could not create directory",
        StorageError::CreateFolder { .. } => "Could not create folder",
        StorageError::CreateFile { .. } => "Could not create file",
        StorageError::OpenFile { .. } => "Could not open file",
        StorageError::StatFile { .. } => "Could not get file info",
        StorageError::ReadDirectory { .. } => "Could not read directory",
        StorageError::Transfer { .. } => "Could not write file",
        _ => "Internal server error",
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        let status = error_to_status_code(&err);

        if status == StatusCode::BAD_REQUEST {
            warn!("Rejected request: {}", err);
            ApiError::BadRequest(err.to_string())
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(err.to_string())
        } else {
            error!("Storage failure: {}", err);
            ApiError::Internal(internal_message(&err).to_string())
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
