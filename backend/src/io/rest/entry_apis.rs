//! # REST API for Milk Entries
//!
//! Endpoints for listing, creating and deleting entries, plus the rate quote
//! used to preview a sample before it is recorded.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{CreateMilkEntryRequest, MilkEntry as SharedMilkEntry, QuoteRequest};
use tracing::{info, warn};

use super::{entry_error_response, error_response, mappers::milk_entry_mapper::MilkEntryMapper};
use crate::{
    domain::{commands::entries::EntryListQuery, validation::parse_entry_type},
    AppState,
};

/// Query parameters for the entry listing API
#[derive(Debug, Default, Deserialize)]
pub struct EntryListParams {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

/// List entries, most recent date first, optionally only one type
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<EntryListParams>,
) -> impl IntoResponse {
    info!("GET /api/milk/entries - query: {:?}", params);

    let entry_type = match params.entry_type.as_deref() {
        Some(text) => match parse_entry_type(Some(text)) {
            Ok(entry_type) => Some(entry_type),
            Err(e) => return entry_error_response(e, "list entries"),
        },
        None => None,
    };

    match state
        .entry_service
        .query_entries(EntryListQuery { entry_type })
        .await
    {
        Ok(entries) => {
            let dtos: Vec<SharedMilkEntry> =
                entries.into_iter().map(MilkEntryMapper::to_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => entry_error_response(e, "list entries"),
    }
}

/// Record a new entry; snf and amount are computed server-side
pub async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateMilkEntryRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("POST /api/milk/entries - unreadable body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };
    info!("POST /api/milk/entries - request: {:?}", request);

    match state
        .entry_service
        .create_entry(MilkEntryMapper::to_create_command(request))
        .await
    {
        Ok(entry) => (StatusCode::CREATED, Json(MilkEntryMapper::to_dto(entry))).into_response(),
        Err(e) => entry_error_response(e, "create entry"),
    }
}

/// Delete one entry by id
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/milk/entries/{}", entry_id);

    match state.entry_service.delete_entry(&entry_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => entry_error_response(e, "delete entry"),
    }
}

/// Preview snf, suggested rate and amount without recording anything
pub async fn quote_entry(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    info!("POST /api/milk/quote - request: {:?}", request);

    match state
        .entry_service
        .quote(MilkEntryMapper::to_quote_command(request))
    {
        Ok(quote) => (StatusCode::OK, Json(MilkEntryMapper::to_quote_dto(quote))).into_response(),
        Err(e) => entry_error_response(e, "quote entry"),
    }
}
