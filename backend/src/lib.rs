//! # Dairy Ledger Backend
//!
//! HTTP backend for recording milk purchases from contractors and sales to
//! clients.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (entry and report services, calculations)
//!     ↓
//! Storage Layer (memory, CSV or SQLite behind one trait)
//! ```
//!
//! [`initialize_backend`] wires the services to the configured storage and
//! [`create_router`] exposes them under `/api/milk`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, CorsConfig, PricingConfig};
use crate::domain::{EntryService, ExportService, ReportService};
use crate::storage::{open_storage, MemoryEntryStore, MilkEntryStorage};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub entry_service: EntryService,
    pub report_service: ReportService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn from_storage(storage: Arc<dyn MilkEntryStorage>, pricing: PricingConfig) -> Self {
        let entry_service = EntryService::with_pricing(storage.clone(), pricing);
        Self {
            export_service: ExportService::new(entry_service.clone()),
            entry_service,
            report_service: ReportService::new(storage),
        }
    }

    /// State backed by a fresh in-memory store with default prices
    pub fn in_memory() -> Self {
        Self::from_storage(Arc::new(MemoryEntryStore::new()), PricingConfig::default())
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let storage = open_storage(&config.storage).await?;

    info!("Setting up domain services");
    Ok(AppState::from_storage(storage, config.pricing.clone()))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors: &CorsConfig) -> Router {
    let milk_routes = Router::new()
        .route(
            "/entries",
            get(io::entry_apis::list_entries).post(io::entry_apis::create_entry),
        )
        .route("/entries/export", get(io::export_apis::export_entries_csv))
        .route("/entries/:id", delete(io::entry_apis::delete_entry))
        .route("/quote", post(io::entry_apis::quote_entry))
        .route("/summary", get(io::report_apis::get_summary))
        .route("/summary/monthly", get(io::report_apis::get_monthly_summary))
        .route("/billing", get(io::report_apis::get_billing));

    Router::new()
        .nest("/api/milk", milk_routes)
        .route("/api/health", get(health))
        .layer(cors_layer(cors))
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    match config {
        CorsConfig::AnyOrigin => layer.allow_origin(Any),
        CorsConfig::Origins(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin '{}'", origin);
                        None
                    }
                })
                .collect();
            layer.allow_origin(allowed)
        }
    }
}
