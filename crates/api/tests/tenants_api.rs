//! HTTP-level tests for `/api/v1/tenants`, favourites included.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, manager_token, post_json, put_json, send, tenant_token};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_and_fetch_tenant(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/tenants",
        &tenant_token("ten-1"),
        json!({ "cognitoId": "ten-1", "name": "Tarik", "email": "tarik@stayio.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["favorites"], json!([]));

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tenants/ten-1", Some(&tenant_token("ten-1"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "tarik@stayio.test");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tenant_cannot_register_someone_else(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tenants",
        &tenant_token("ten-1"),
        json!({ "cognitoId": "ten-2", "name": "Mallory" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn registration_rejects_malformed_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/tenants",
        &tenant_token("ten-1"),
        json!({ "cognitoId": "ten-1", "name": "Tarik", "email": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn manager_token_is_forbidden_on_tenant_routes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tenants/ten-1", Some(&manager_token("ten-1"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_tenant_settings(pool: PgPool) {
    common::seed_tenant(&pool, "ten-1").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/tenants/ten-1",
        &tenant_token("ten-1"),
        json!({ "name": "Tarik T.", "email": "t@stayio.test", "phoneNumber": "5550001111" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["phoneNumber"], "5550001111");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favourites_can_be_added_and_removed(pool: PgPool) {
    common::seed_manager(&pool, "mgr-1").await;
    common::seed_tenant(&pool, "ten-1").await;
    let property = common::seed_property(&pool, "mgr-1", common::sample_details()).await;
    let uri = format!("/api/v1/tenants/ten-1/favorites/{}", property.id);
    let token = tenant_token("ten-1");

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["favorites"], json!([property.id]));

    // Adding twice is a no-op.
    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::POST, &uri, Some(&token), None).await;
    assert_eq!(body_json(response).await["favorites"], json!([property.id]));

    let app = common::build_test_app(pool.clone());
    let response = send(app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["favorites"], json!([]));

    // Removing again still returns the tenant.
    let app = common::build_test_app(pool);
    let response = send(app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn favouriting_unknown_property_returns_404(pool: PgPool) {
    common::seed_tenant(&pool, "ten-1").await;

    let app = common::build_test_app(pool);
    let response = send(
        app,
        Method::POST,
        "/api/v1/tenants/ten-1/favorites/424242",
        Some(&tenant_token("ten-1")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Property not found");
}
