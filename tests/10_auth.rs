mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

/// Seller routes must reject missing credentials before any store access;
/// these tests run against a router whose store has no live database
/// behind it, so a rejection that reached the store would hang or error
/// instead of returning 401.
#[tokio::test]
async fn seller_listing_without_token_is_unauthorized() -> Result<()> {
    let app = common::test_app().await;

    let response = app
        .oneshot(Request::get("/api/seller/toys").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], json!(true));
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() -> Result<()> {
    let app = common::test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/seller/toys")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let app = common::test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/seller/toys")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_without_email_claim_is_unauthorized() -> Result<()> {
    let app = common::test_app().await;
    let token =
        playmart_api::auth::issue_token(json!({ "role": "seller" }), common::TEST_SECRET)?;

    let response = app
        .oneshot(
            Request::get("/api/seller/toys")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn mutation_endpoints_require_a_token() -> Result<()> {
    for (method, uri) in [
        (Method::POST, "/api/seller/toys"),
        (Method::PUT, "/api/seller/toys/507f1f77bcf86cd799439011"),
        (Method::DELETE, "/api/seller/toys/507f1f77bcf86cd799439011"),
    ] {
        let app = common::test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))?,
            )
            .await?;

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should be gated",
            method,
            uri
        );
    }
    Ok(())
}

/// The ownership cross-check on create runs before any insert, so a
/// mismatched sellerEmail is 403 with no document written.
#[tokio::test]
async fn create_with_mismatched_seller_email_is_forbidden() -> Result<()> {
    let app = common::test_app().await;

    let response = app
        .oneshot(
            Request::post("/api/seller/toys")
                .header(header::AUTHORIZATION, common::bearer_for("real@example.com"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Wooden Train",
                        "price": 15.0,
                        "sellerEmail": "someone-else@example.com"
                    })
                    .to_string(),
                ))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::body_json(response).await;
    assert_eq!(body["code"], json!("FORBIDDEN"));
    Ok(())
}

/// Malformed identifiers are rejected by the route layer before the
/// ownership filter ever reaches the store.
#[tokio::test]
async fn update_with_malformed_id_is_bad_request() -> Result<()> {
    let app = common::test_app().await;

    let response = app
        .oneshot(
            Request::put("/api/seller/toys/not-an-object-id")
                .header(header::AUTHORIZATION, common::bearer_for("real@example.com"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "price": 9.99 }).to_string()))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
