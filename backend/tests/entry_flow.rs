use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use dairy_ledger_backend::{
    config::{AppConfig, CorsConfig, PricingConfig, StorageConfig},
    create_router, initialize_backend, AppState,
};
use serde_json::{json, Value};
use shared::MilkEntry;
use std::collections::HashSet;
use tempfile::TempDir;
use tower::ServiceExt;

async fn app_with_storage(storage: StorageConfig) -> Router {
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        storage,
        cors: CorsConfig::AnyOrigin,
        pricing: PricingConfig::default(),
    };
    let state = initialize_backend(&config).await.unwrap();
    create_router(state, &config.cors)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn entry_body(date: &str, party: &str) -> Value {
    json!({
        "date": date,
        "partyId": party,
        "type": "PURCHASE",
        "quantity": "10",
        "fat": "4.0",
        "clr": "28",
        "rate": "35"
    })
}

async fn list(app: &Router) -> Vec<MilkEntry> {
    let (status, body) = call(app, Method::GET, "/api/milk/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_create_list_delete_flow() {
    let app = app_with_storage(StorageConfig::Memory).await;

    let (status, created) = call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-02-01", "farm-a"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: MilkEntry = serde_json::from_value(created).unwrap();
    assert_eq!(created.snf, 8.5);
    assert_eq!(created.amount, 350.0);
    assert_eq!(created.status, "PENDING");

    call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-03-01", "farm-b"))).await;
    call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-01-01", "farm-c"))).await;

    let dates: Vec<String> = list(&app).await.into_iter().map(|e| e.date).collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

    let uri = format!("/api/milk/entries/{}", created.id);
    let (status, _) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(list(&app).await.iter().all(|e| e.id != created.id));

    let (status, body) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&created.id));
}

#[tokio::test]
async fn test_failed_validation_leaves_store_untouched() {
    let app = app_with_storage(StorageConfig::Memory).await;
    let mut body = entry_body("2024-02-01", "farm-a");
    body["quantity"] = json!(0);

    let (status, error) = call(&app, Method::POST, "/api/milk/entries", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let app = app_with_storage(StorageConfig::Memory).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (status, body) = call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-04-01", &format!("party-{}", i)))).await;
            assert_eq!(status, StatusCode::CREATED);
            body["id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(list(&app).await.len(), 20);
}

#[tokio::test]
async fn test_csv_entries_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageConfig::Csv {
        data_dir: temp_dir.path().to_path_buf(),
    };

    let app = app_with_storage(storage.clone()).await;
    let (status, _) = call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-05-05", "farm-a"))).await;
    assert_eq!(status, StatusCode::CREATED);
    drop(app);

    let reopened = app_with_storage(storage).await;
    let entries = list(&reopened).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].party_id, "farm-a");
    assert_eq!(entries[0].amount, 350.0);
}

#[tokio::test]
async fn test_sqlite_entries_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageConfig::Sqlite {
        database_url: None,
        data_dir: temp_dir.path().to_path_buf(),
    };

    let app = app_with_storage(storage.clone()).await;
    call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-05-05", "farm-a"))).await;
    call(&app, Method::POST, "/api/milk/entries", Some(entry_body("2024-05-05", "farm-b"))).await;
    drop(app);

    let reopened = app_with_storage(storage).await;
    let parties: Vec<String> = list(&reopened).await.into_iter().map(|e| e.party_id).collect();
    // same date: newest first
    assert_eq!(parties, vec!["farm-b", "farm-a"]);
}

#[tokio::test]
async fn test_in_memory_state_is_isolated() {
    let first = create_router(AppState::in_memory(), &CorsConfig::AnyOrigin);
    let second = create_router(AppState::in_memory(), &CorsConfig::AnyOrigin);

    call(&first, Method::POST, "/api/milk/entries", Some(entry_body("2024-01-01", "farm-a"))).await;

    assert_eq!(list(&first).await.len(), 1);
    assert!(list(&second).await.is_empty());
}
