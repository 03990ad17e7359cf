//! HTTP-level tests: the real server wired to the embedded SQLite store and
//! an in-process stub of the product catalog service.

use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use order_service::config::{AppConfig, ProductServiceConfig};
use order_service::{build_server, create_pool, init_schema};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

fn free_port() -> u16 {
    // Bind to port 0 to let the OS assign a free port, then release it.
    // There is a small TOCTOU window, but it is acceptable for test usage.
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind failed")
        .local_addr()
        .expect("addr failed")
        .port()
}

/// Wait until `url` answers at all, retrying every `interval` for up to
/// `timeout` total. Panics if the service never comes up.
async fn wait_for_http(label: &str, url: &str, timeout: Duration, interval: Duration) {
    let client = Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if tokio::time::Instant::now() > deadline {
            panic!("{} did not become ready within {:?}", label, timeout);
        }
        // Any HTTP response (even 4xx) means the server is up.
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(interval).await;
    }
}

// ── Stub product catalog ─────────────────────────────────────────────────────

async fn stub_product(path: web::Path<String>) -> HttpResponse {
    match path.as_str() {
        "P1" => HttpResponse::Ok().json(json!({ "id": "P1", "stock": 5, "price": "19.99" })),
        "PLOW" => HttpResponse::Ok().json(json!({ "id": "PLOW", "stock": 1, "price": 4.5 })),
        "PJUNK" => HttpResponse::Ok()
            .content_type("application/json")
            .body("{\"id\": \"PJUNK\", \"stock\":"),
        "PSLOW" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            HttpResponse::Ok().json(json!({ "id": "PSLOW", "stock": 100, "price": "1.00" }))
        }
        "P500" => HttpResponse::InternalServerError().finish(),
        _ => HttpResponse::NotFound().json(json!({ "detail": "Product not found" })),
    }
}

/// Spawn the stub catalog on a free port and return its base URL.
async fn spawn_catalog_stub() -> String {
    let port = free_port();
    let server = HttpServer::new(|| App::new().route("/products/{id}", web::get().to(stub_product)))
        .bind(("127.0.0.1", port))
        .expect("failed to bind stub catalog")
        .run();
    tokio::spawn(server);

    let base = format!("http://127.0.0.1:{}", port);
    wait_for_http(
        "stub catalog",
        &format!("{}/products/P1", base),
        Duration::from_secs(10),
        Duration::from_millis(100),
    )
    .await;
    base
}

/// Spawn the order service against `catalog_url` with a fresh SQLite store;
/// returns its base URL.
async fn spawn_app(catalog_url: &str, lookup_timeout: Duration) -> String {
    let db_path = std::env::temp_dir().join(format!("order-e2e-{}.db", Uuid::new_v4()));
    let port = free_port();
    let cfg = AppConfig {
        host: "127.0.0.1".to_string(),
        port,
        database_url: db_path.to_str().expect("temp path is valid utf-8").to_string(),
        product_service: ProductServiceConfig {
            base_url: catalog_url.to_string(),
            timeout: lookup_timeout,
        },
    };

    let pool = create_pool(&cfg.database_url);
    init_schema(&pool).expect("schema init failed");

    let server = build_server(pool, &cfg).expect("failed to bind the order service");
    tokio::spawn(server);

    let base = format!("http://127.0.0.1:{}", port);
    wait_for_http(
        "order service",
        &format!("{}/health", base),
        Duration::from_secs(10),
        Duration::from_millis(100),
    )
    .await;
    base
}

async fn post_order(app: &str, product_id: &str, quantity: i32) -> reqwest::Response {
    Client::new()
        .post(format!("{}/orders", app))
        .json(&json!({ "productId": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to POST /orders")
}

/// Base URL of a port where nothing listens.
fn dead_catalog() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_returns_welcome_payload() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = Client::new()
        .get(format!("{}/", app))
        .send()
        .await
        .expect("Failed to GET /");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body, json!({ "message": "Welcome to the Order Service!" }));
}

#[tokio::test]
async fn health_is_up_even_when_catalog_is_down() {
    let app = spawn_app(&dead_catalog(), Duration::from_millis(200)).await;

    let resp = Client::new()
        .get(format!("{}/health", app))
        .send()
        .await
        .expect("Failed to GET /health");

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body, json!({ "status": "ok", "service": "order-service" }));
}

#[tokio::test]
async fn create_order_confirms_when_stock_is_sufficient() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "P1", 2).await;
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["productId"], "P1");
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["status"], "confirmed");
    let id = body["id"].as_str().expect("response should carry an id");

    let read: Value = Client::new()
        .get(format!("{}/orders/{}", app, id))
        .send()
        .await
        .expect("Failed to GET /orders/{id}")
        .json()
        .await
        .expect("body should be JSON");
    assert_eq!(read["status"], "confirmed");
    assert_eq!(read["quantity"], 2);
}

#[tokio::test]
async fn insufficient_stock_rejects_and_leaves_an_audit_row() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "PLOW", 2).await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "InsufficientStock");
    let order_id = body["orderId"]
        .as_str()
        .expect("rejection should carry the audit row id");

    let read: Value = Client::new()
        .get(format!("{}/orders/{}", app, order_id))
        .send()
        .await
        .expect("Failed to GET /orders/{id}")
        .json()
        .await
        .expect("body should be JSON");
    assert_eq!(read["status"], "rejected");
}

#[tokio::test]
async fn unknown_product_rejects_with_product_not_found() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "MISSING", 1).await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "ProductNotFound");
    assert!(body["orderId"].is_string());
}

#[tokio::test]
async fn non_positive_quantity_rejects_without_audit_row() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "P1", 0).await;
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "InvalidInput");
    assert!(body["orderId"].is_null());
}

#[tokio::test]
async fn undeserializable_body_rejects_as_invalid_input() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = Client::new()
        .post(format!("{}/orders", app))
        .header("content-type", "application/json")
        .body("{\"productId\": \"P1\"")
        .send()
        .await
        .expect("Failed to POST /orders");

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "InvalidInput");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unreachable_catalog_maps_to_dependency_unavailable() {
    let app = spawn_app(&dead_catalog(), Duration::from_millis(500)).await;

    let resp = post_order(&app, "P1", 1).await;
    assert_eq!(resp.status(), 502);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "DependencyUnavailable");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn slow_catalog_maps_to_dependency_unavailable() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_millis(200)).await;

    let resp = post_order(&app, "PSLOW", 1).await;
    assert_eq!(resp.status(), 502);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "DependencyUnavailable");
}

#[tokio::test]
async fn catalog_server_error_maps_to_dependency_unavailable() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "P500", 1).await;
    assert_eq!(resp.status(), 502);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "DependencyUnavailable");
}

#[tokio::test]
async fn malformed_catalog_payload_maps_to_contract_violation() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = post_order(&app, "PJUNK", 1).await;
    assert_eq!(resp.status(), 502);

    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "DependencyContractViolation");
}

#[tokio::test]
async fn repeated_requests_classify_identically() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    for _ in 0..2 {
        let resp = post_order(&app, "PLOW", 2).await;
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.expect("body should be JSON");
        assert_eq!(body["error"], "InsufficientStock");
    }
}

#[tokio::test]
async fn get_unknown_order_returns_404() {
    let catalog = spawn_catalog_stub().await;
    let app = spawn_app(&catalog, Duration::from_secs(3)).await;

    let resp = Client::new()
        .get(format!("{}/orders/{}", app, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to GET /orders/{id}");

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["error"], "NotFound");
}
