//! Dashboard and billing reports.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::{MonthlyTotals, PartyBilling};
use tracing::info;

use super::{entry_error_response, mappers::milk_entry_mapper::MilkEntryMapper};
use crate::{
    domain::{commands::reports::BillingQuery, validation::parse_entry_type},
    AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct BillingParams {
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/milk/summary");

    match state.report_service.summary().await {
        Ok(summary) => (StatusCode::OK, Json(MilkEntryMapper::to_summary_dto(summary))).into_response(),
        Err(e) => entry_error_response(e, "build summary"),
    }
}

/// Purchase and sale amounts per month for the dashboard chart
pub async fn get_monthly_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/milk/summary/monthly");

    match state.report_service.monthly_totals().await {
        Ok(rows) => {
            let dtos: Vec<MonthlyTotals> =
                rows.into_iter().map(MilkEntryMapper::to_monthly_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => entry_error_response(e, "build monthly summary"),
    }
}

pub async fn get_billing(
    State(state): State<AppState>,
    Query(params): Query<BillingParams>,
) -> impl IntoResponse {
    info!("GET /api/milk/billing - query: {:?}", params);

    let entry_type = match params.entry_type.as_deref() {
        Some(text) => match parse_entry_type(Some(text)) {
            Ok(entry_type) => Some(entry_type),
            Err(e) => return entry_error_response(e, "build billing report"),
        },
        None => None,
    };

    match state.report_service.billing(BillingQuery { entry_type }).await {
        Ok(rows) => {
            let dtos: Vec<PartyBilling> =
                rows.into_iter().map(MilkEntryMapper::to_billing_dto).collect();
            (StatusCode::OK, Json(dtos)).into_response()
        }
        Err(e) => entry_error_response(e, "build billing report"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CorsConfig, create_router};
    use axum::{
        body::Body,
        http::{Method, Request},
        Router,
    };
    use serde_json::json;
    use shared::EntrySummaryResponse;
    use tower::ServiceExt;

    async fn post_entry(app: &Router, party: &str, entry_type: &str, quantity: f64, rate: f64) {
        let body = json!({
            "date": "2024-05-01",
            "partyId": party,
            "type": entry_type,
            "quantity": quantity,
            "fat": 4.0,
            "clr": 28.0,
            "rate": rate
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/milk/entries")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn seeded_app() -> Router {
        let app = create_router(AppState::in_memory(), &CorsConfig::AnyOrigin);
        post_entry(&app, "farm-a", "PURCHASE", 10.0, 35.0).await;
        post_entry(&app, "farm-a", "PURCHASE", 5.0, 36.0).await;
        post_entry(&app, "hotel-1", "SALE", 8.0, 50.0).await;
        app
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/milk/summary").await;

        assert_eq!(status, StatusCode::OK);
        let summary: EntrySummaryResponse = serde_json::from_value(body).unwrap();
        assert_eq!(summary.total_purchase_amount, 530.0);
        assert_eq!(summary.total_sale_amount, 400.0);
        assert_eq!(summary.total_purchase_quantity, 15.0);
        assert_eq!(summary.profit, -130.0);
        assert_eq!(summary.entry_count, 3);
    }

    #[tokio::test]
    async fn test_monthly_summary_endpoint() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/milk/summary/monthly").await;

        assert_eq!(status, StatusCode::OK);
        let months: Vec<MonthlyTotals> = serde_json::from_value(body).unwrap();
        assert_eq!(
            months,
            vec![MonthlyTotals {
                month: "2024-05".to_string(),
                purchase_amount: 530.0,
                sale_amount: 400.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_billing_endpoint_groups_by_party() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/milk/billing").await;
        assert_eq!(status, StatusCode::OK);
        let rows: Vec<PartyBilling> = serde_json::from_value(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].party_id, "farm-a");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].amount, 530.0);

        let (_, body) = get_json(&app, "/api/milk/billing?type=sale").await;
        let rows: Vec<PartyBilling> = serde_json::from_value(body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].party_id, "hotel-1");
    }

    #[tokio::test]
    async fn test_billing_rejects_unknown_type() {
        let app = seeded_app().await;

        let (status, body) = get_json(&app, "/api/milk/billing?type=BARTER").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("BARTER"));
    }
}
