#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};

use playmart_api::auth::issue_token;
use playmart_api::config::AppConfig;
use playmart_api::store::Store;
use playmart_api::{app, AppContext};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the router in-process. The MongoDB driver connects lazily, so the
/// store handle is only a parsed connection string; routes exercised by
/// these tests never touch the store.
pub async fn test_app() -> Router {
    let config = AppConfig::from_lookup(|name| match name {
        "SECRET_KEY" => Some(TEST_SECRET.to_string()),
        "MONGODB_DB" => Some("playmart-test".to_string()),
        _ => None,
    })
    .expect("test config");

    let store = Store::connect(&config.database)
        .await
        .expect("store handle");

    app(AppContext {
        store,
        config: Arc::new(config),
    })
}

/// Authorization header value for a seller signed with the test secret.
pub fn bearer_for(email: &str) -> String {
    let token = issue_token(json!({ "email": email }), TEST_SECRET).expect("token");
    format!("Bearer {}", token)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
