//! # REST API for Data Export
//!
//! Download of the entry ledger as a CSV file.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::Local;
use tracing::info;

use super::{entry_apis::EntryListParams, entry_error_response};
use crate::{
    domain::{commands::entries::EntryListQuery, validation::parse_entry_type},
    AppState,
};

/// Export entries as CSV, optionally only one type
pub async fn export_entries_csv(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> impl IntoResponse {
    info!("GET /api/milk/entries/export - query: {:?}", params);

    let entry_type = match params.entry_type.as_deref() {
        Some(text) => match parse_entry_type(Some(text)) {
            Ok(entry_type) => Some(entry_type),
            Err(e) => return entry_error_response(e, "export entries"),
        },
        None => None,
    };

    match state
        .export_service
        .export_entries_csv(EntryListQuery { entry_type }, Local::now().date_naive())
        .await
    {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.content,
        )
            .into_response(),
        Err(e) => entry_error_response(e, "export entries"),
    }
}
