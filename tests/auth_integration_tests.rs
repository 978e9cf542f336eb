use petshop_portal::{
    AppConfig, AppState, create_router,
    models::{Product, UserResponse},
    repository::{MemoryRepository, RepositoryState},
    seed,
};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_app() -> String {
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

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("request failed")
}

// --- Session Lifecycle ---

#[tokio::test]
async fn test_seeded_admin_login_and_session_round_trip() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "admin@petshop.com", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let logged_in: UserResponse = response.json().await.unwrap();
    assert_eq!(logged_in.role, "admin");

    // The session cookie must resolve to the same principal.
    let response = client
        .get(format!("{}/api/user", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let current: UserResponse = response.json().await.unwrap();
    assert_eq!(current.id, logged_in.id);
    assert_eq!(current.role, "admin");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_401() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "admin@petshop.com", "password": "hunter2" }),
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_login_with_unknown_username_is_401() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "nobody@petshop.com", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_register_authenticates_immediately() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/register", address),
        serde_json::json!({
            "username": "ana@example.com",
            "password": "s3nha-forte",
            "name": "Ana"
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    // Role defaults to "user" and the credential hash never leaves the server.
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());

    let response = client
        .get(format!("{}/api/user", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let current: UserResponse = response.json().await.unwrap();
    assert_eq!(current.username, "ana@example.com");
}

#[tokio::test]
async fn test_duplicate_username_register_is_rejected() {
    let address = spawn_app().await;

    let first = session_client();
    let response = post_json(
        &first,
        format!("{}/api/register", address),
        serde_json::json!({
            "username": "bruno@example.com",
            "password": "original-pass",
            "name": "Bruno"
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    let second = session_client();
    let response = post_json(
        &second,
        format!("{}/api/register", address),
        serde_json::json!({
            "username": "bruno@example.com",
            "password": "other-pass",
            "name": "Impostor"
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    // The first account is unchanged: its original credential still logs in.
    let fresh = session_client();
    let response = post_json(
        &fresh,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "bruno@example.com", "password": "original-pass" }),
    )
    .await;
    assert_eq!(response.status(), 200);
    let user: UserResponse = response.json().await.unwrap();
    assert_eq!(user.name, "Bruno");
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "admin@petshop.com", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/api/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/user", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_user_endpoint_requires_a_session() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/user", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

// --- Authorization Gates ---

#[tokio::test]
async fn test_admin_endpoints_reject_anonymous_requests() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_json(
        &client,
        format!("{}/api/products", address),
        serde_json::json!({
            "name": "X", "description": "d", "price": 100, "category": "racao", "imageUrl": "u"
        }),
    )
    .await;
    assert_eq!(response.status(), 401);

    let response = client
        .put(format!("{}/api/products/1", address))
        .json(&serde_json::json!({ "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    let response = client
        .delete(format!("{}/api/products/1", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    for path in ["/api/appointments", "/api/orders"] {
        let response = client
            .get(format!("{}{}", address, path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401, "GET {path} must require admin");
    }

    // None of the rejected calls may have mutated state.
    let products: Vec<Product> = client
        .get(format!("{}/api/products", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 4);
    assert!(products.iter().all(|p| p.name != "X"));
}

#[tokio::test]
async fn test_admin_endpoints_reject_non_admin_sessions() {
    let address = spawn_app().await;
    let client = session_client();

    let response = post_json(
        &client,
        format!("{}/api/register", address),
        serde_json::json!({
            "username": "carla@example.com",
            "password": "s3nha",
            "name": "Carla"
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = post_json(
        &client,
        format!("{}/api/products", address),
        serde_json::json!({
            "name": "X", "description": "d", "price": 100, "category": "racao", "imageUrl": "u"
        }),
    )
    .await;
    assert_eq!(response.status(), 401);

    let response = client
        .get(format!("{}/api/orders", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn test_admin_listings_are_visible_to_admin() {
    let address = spawn_app().await;

    // A guest books an appointment and checks out an order.
    let guest = reqwest::Client::new();
    let response = post_json(
        &guest,
        format!("{}/api/appointments", address),
        serde_json::json!({
            "customerName": "Maria Silva",
            "contactPhone": "+55 11 99999-0000",
            "petName": "Rex",
            "serviceName": "Tosa Higiênica",
            "date": "2026-09-02T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = post_json(
        &guest,
        format!("{}/api/orders", address),
        serde_json::json!({
            "customerName": "Maria Silva",
            "total": 3500,
            "items": [
                { "productId": 3, "name": "Shampoo Pet Cheirinho de Bebê", "price": 3500, "quantity": 1 }
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), 201);

    // The admin panel lists both.
    let admin = session_client();
    let response = post_json(
        &admin,
        format!("{}/api/login", address),
        serde_json::json!({ "username": "admin@petshop.com", "password": "admin123" }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let appointments: Vec<serde_json::Value> = admin
        .get(format!("{}/api/appointments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["petName"], "Rex");

    let orders: Vec<serde_json::Value> = admin
        .get(format!("{}/api/orders", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total"], 3500);
}
