use petshop_portal::{
    AppConfig, AppState, create_router,
    models::{Appointment, Order, Product},
    repository::{MemoryRepository, RepositoryState},
    seed,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

/// Boots the full application (seeded in-memory store, real router, real
/// session layer) on an ephemeral port and returns its base address.
async fn spawn_app() -> TestApp {
    let repo = Arc::new(MemoryRepository::new()) as RepositoryState;
    seed::seed_database(&repo).await;

    let state = AppState {
        repo,
        config: AppConfig::default(),
    };
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

/// A client with a cookie jar, so session cookies survive across requests.
fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

async fn login_admin(client: &reqwest::Client, address: &str) {
    let response = client
        .post(format!("{}/api/login", address))
        .json(&serde_json::json!({
            "username": "admin@petshop.com",
            "password": "admin123"
        }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_seeded_catalog_is_listed() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let products: Vec<Product> = client
        .get(format!("{}/api/products", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 4);

    let services: Vec<serde_json::Value> = client
        .get(format!("{}/api/services", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(services.len(), 6);
}

#[tokio::test]
async fn test_product_category_filter_is_exact() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let matched: Vec<Product> = client
        .get(format!("{}/api/products?category=Higiene", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert!(matched.iter().all(|p| p.category == "Higiene"));

    // The match is case-sensitive as given: a lowercased tag is a different tag.
    let lowercased: Vec<Product> = client
        .get(format!("{}/api/products?category=higiene", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(lowercased.is_empty());
}

#[tokio::test]
async fn test_get_unknown_product_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/products/9999", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_product_lifecycle_as_admin() {
    let app = spawn_app().await;
    let client = session_client();
    login_admin(&client, &app.address).await;

    // Create
    let response = client
        .post(format!("{}/api/products", app.address))
        .json(&serde_json::json!({
            "name": "X", "description": "d", "price": 100, "category": "racao", "imageUrl": "u"
        }))
        .send()
        .await
        .expect("post fail");
    assert_eq!(response.status(), 201);
    let created: Product = response.json().await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.price, 100);
    assert_eq!(created.category, "racao");

    // Read back
    let fetched: Product = client
        .get(format!("{}/api/products/{}", app.address, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);

    // Partial update: only the price changes.
    let response = client
        .put(format!("{}/api/products/{}", app.address, created.id))
        .json(&serde_json::json!({ "price": 150 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Product = response.json().await.unwrap();
    assert_eq!(updated.price, 150);
    assert_eq!(updated.name, "X");

    // Delete
    let response = client
        .delete(format!("{}/api/products/{}", app.address, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/api/products/{}", app.address, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_update_unknown_product_is_404() {
    let app = spawn_app().await;
    let client = session_client();
    login_admin(&client, &app.address).await;

    let response = client
        .put(format!("{}/api/products/9999", app.address))
        .json(&serde_json::json!({ "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_create_appointment() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/appointments", app.address))
        .json(&serde_json::json!({
            "customerName": "Maria Silva",
            "contactPhone": "+55 11 99999-0000",
            "petName": "Rex",
            "serviceName": "Banho Completo",
            "date": "2026-09-01T14:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let appointment: Appointment = response.json().await.unwrap();
    assert!(appointment.id > 0);
    assert_eq!(appointment.status, "pending");
    assert_eq!(appointment.service_name, "Banho Completo");
}

#[tokio::test]
async fn test_appointment_with_blank_fields_is_400() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/appointments", app.address))
        .json(&serde_json::json!({
            "customerName": "",
            "contactPhone": "",
            "petName": "Rex",
            "serviceName": "Banho Completo",
            "date": "2026-09-01T14:00:00Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // Every violated field is reported, not just the first.
    let body: serde_json::Value = response.json().await.unwrap();
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 2);
}

#[tokio::test]
async fn test_guest_order_stores_items_snapshot() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let items = serde_json::json!([
        { "productId": 1, "name": "X", "price": 100, "quantity": 2 }
    ]);
    let response = client
        .post(format!("{}/api/orders", app.address))
        .json(&serde_json::json!({
            "customerName": "Guest Buyer",
            "total": 200,
            "items": items
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let order: Order = response.json().await.unwrap();
    assert!(order.id > 0);
    assert_eq!(order.status, "pending");
    assert_eq!(order.user_id, None);
    assert_eq!(order.total, 200);
    assert_eq!(serde_json::to_value(&order.items).unwrap(), items);
}

#[tokio::test]
async fn test_order_with_no_items_is_400() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/orders", app.address))
        .json(&serde_json::json!({
            "customerName": "Guest Buyer",
            "total": 0,
            "items": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_logged_in_order_is_stamped_with_session_user() {
    let app = spawn_app().await;
    let client = session_client();
    login_admin(&client, &app.address).await;

    // The client-supplied userId must lose to the session principal.
    let response = client
        .post(format!("{}/api/orders", app.address))
        .json(&serde_json::json!({
            "customerName": "Administrador",
            "userId": 999,
            "total": 4990,
            "items": [
                { "productId": 2, "name": "Brinquedo Mordedor Resistente", "price": 4990, "quantity": 1 }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let order: Order = response.json().await.unwrap();
    assert_eq!(order.user_id, Some(1), "seed admin is the first user");
}

#[tokio::test]
async fn test_unknown_payload_field_is_rejected() {
    let app = spawn_app().await;
    let client = session_client();
    login_admin(&client, &app.address).await;

    let response = client
        .post(format!("{}/api/products", app.address))
        .json(&serde_json::json!({
            "name": "X", "description": "d", "price": 100, "category": "racao",
            "imageUrl": "u", "stockLevel": 5
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}
