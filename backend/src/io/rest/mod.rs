//! # REST API Interface Layer
//!
//! HTTP endpoints for the milk ledger. This layer only translates: JSON in,
//! domain command out, domain result back to JSON. No business rules live
//! here.
//!
//! Domain errors map onto status codes as follows:
//!
//! | Error | Status |
//! |---|---|
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `Storage` | 500 |

pub mod entry_apis;
pub mod export_apis;
pub mod mappers;
pub mod report_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::EntryError;

/// Build the JSON error body used by every endpoint
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Translate a domain error, logging it at a level matching its severity
pub fn entry_error_response(err: EntryError, action: &str) -> Response {
    match err {
        EntryError::Validation(message) => {
            warn!("Rejected request to {}: {}", action, message);
            error_response(StatusCode::BAD_REQUEST, message)
        }
        EntryError::NotFound(id) => {
            warn!("Failed to {}: entry {} not found", action, id);
            error_response(StatusCode::NOT_FOUND, format!("entry '{}' not found", id))
        }
        EntryError::Storage(source) => {
            error!("Failed to {}: {:#}", action, source);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error trying to {}", action),
            )
        }
    }
}
