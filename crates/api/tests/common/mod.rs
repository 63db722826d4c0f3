#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;

use stayio_api::auth::jwt::{Claims, JwtConfig, VerificationKey};
use stayio_api::config::{ServerConfig, StorageConfig};
use stayio_api::router::build_app_router;
use stayio_api::state::AppState;
use stayio_api::storage::PhotoStorage;
use stayio_core::forms::PropertyDetails;
use stayio_db::models::manager::CreateManager;
use stayio_db::models::property::{CreateProperty, Property};
use stayio_db::models::tenant::CreateTenant;
use stayio_db::repositories::{ManagerRepo, PropertyRepo, TenantRepo};

pub const TEST_SECRET: &str = "stayio-test-secret";
pub const BOUNDARY: &str = "stayio-test-boundary";
/// Shortest byte string recognised as a PNG image.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Build a test `ServerConfig` with an HMAC token key and a fresh upload directory.
pub fn test_config() -> ServerConfig {
    let upload_dir: PathBuf =
        std::env::temp_dir().join(format!("stayio-test-{}", uuid::Uuid::new_v4()));

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        max_upload_bytes: 5 * 1024 * 1024,
        locale: Default::default(),
        storage: StorageConfig {
            upload_dir,
            public_base_url: "http://localhost:3001/uploads".to_string(),
        },
        jwt: JwtConfig {
            key: VerificationKey::Secret(TEST_SECRET.to_string()),
            issuer: None,
            audience: None,
        },
    }
}

/// Build the production router over `pool` with the test configuration.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, &test_config())
}

/// Like [`build_test_app`], reusing a config so several apps share one upload directory.
pub fn build_test_app_with(pool: PgPool, config: &ServerConfig) -> Router {
    let state = AppState {
        pool,
        storage: Arc::new(PhotoStorage::new(&config.storage)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Sign an ID token for `sub` with the given `custom:role` claim.
pub fn token(sub: &str, role: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        role: Some(role.to_string()),
        email: Some(format!("{sub}@example.com")),
        username: Some(sub.to_string()),
        exp: unix_now() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn manager_token(sub: &str) -> String {
    token(sub, "manager")
}

pub fn tenant_token(sub: &str) -> String {
    token(sub, "tenant")
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    token: &str,
    body: Vec<u8>,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Assemble a `multipart/form-data` body with text fields and `photos` parts.
pub fn multipart_body(fields: &[(&str, String)], photos: &[&[u8]]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (i, photo) in photos.iter().enumerate() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; \
                 filename=\"photo{i}.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(photo);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn sample_details() -> PropertyDetails {
    PropertyDetails {
        name: "Harbour View Loft".into(),
        description: "Bright loft near the ferry".into(),
        price_per_month: 2400.0,
        security_deposit: 2400.0,
        application_fee: 50.0,
        amenities: vec!["WiFi".into(), "Dishwasher".into()],
        highlights: vec!["GreatView".into()],
        beds: 2,
        baths: 1,
        square_feet: 850,
        address: "12 Pier Road".into(),
        city: "Izmir".into(),
        state: "Izmir".into(),
        country: "Turkey".into(),
        postal_code: "35000".into(),
        ..PropertyDetails::default()
    }
}

pub async fn seed_manager(pool: &PgPool, cognito_id: &str) {
    ManagerRepo::create(
        pool,
        &CreateManager {
            cognito_id: cognito_id.into(),
            name: "Mina Manager".into(),
            email: format!("{cognito_id}@example.com"),
            phone_number: "5551234567".into(),
        },
    )
    .await
    .unwrap();
}

pub async fn seed_tenant(pool: &PgPool, cognito_id: &str) {
    TenantRepo::create(
        pool,
        &CreateTenant {
            cognito_id: cognito_id.into(),
            name: "Tarik Tenant".into(),
            email: format!("{cognito_id}@example.com"),
            phone_number: "5557654321".into(),
        },
    )
    .await
    .unwrap();
}

pub async fn seed_property(
    pool: &PgPool,
    manager_cognito_id: &str,
    details: PropertyDetails,
) -> Property {
    PropertyRepo::create(
        pool,
        &CreateProperty {
            details,
            photo_urls: vec!["http://localhost:3001/uploads/properties/seed.png".into()],
            manager_cognito_id: manager_cognito_id.into(),
        },
    )
    .await
    .unwrap()
}
