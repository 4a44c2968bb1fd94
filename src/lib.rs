use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

/// Shared per-process state: the document store handle and the loaded
/// configuration, built once in `main` and injected into every handler.
#[derive(Clone)]
pub struct AppContext {
    pub store: store::Store,
    pub config: Arc<config::AppConfig>,
}

pub fn app(ctx: AppContext) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public content and catalog reads
        .merge(content_routes())
        .merge(toy_routes())
        // Token issuance
        .route("/api/jwt", post(handlers::token::issue))
        // Seller CRUD behind the authorization gate
        .merge(seller_routes())
        // Global middleware
        .layer(Extension(ctx))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn content_routes() -> Router {
    use handlers::content;

    Router::new()
        .route("/api/banner-contents", get(content::banner_contents))
        .route("/api/features", get(content::features))
        .route("/api/hiw-contents", get(content::hiw_contents))
        .route("/api/gallery", get(content::gallery))
        .route("/api/testimonials", get(content::testimonials))
        .route("/api/blogs", get(content::blogs))
        .route("/api/blogs/:id", get(content::blog_by_id))
}

fn toy_routes() -> Router {
    use handlers::toys;

    Router::new()
        .route("/api/toys", get(toys::list_toys))
        .route("/api/toys/category/:subCategory", get(toys::toys_by_category))
        .route("/api/toys/related-toys/:id", get(toys::related_toys))
        .route("/api/toys/:id", get(toys::toy_by_id))
}

fn seller_routes() -> Router {
    use axum::routing::put;
    use handlers::seller;

    Router::new()
        .route(
            "/api/seller/toys",
            get(seller::list_toys).post(seller::create_toy),
        )
        .route(
            "/api/seller/toys/:id",
            put(seller::update_toy).delete(seller::delete_toy),
        )
        .route_layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> Html<&'static str> {
    Html("<h1 style='text-align: center;'>Welcome to the PlayMart Server</h1>")
}

async fn health(Extension(ctx): Extension<AppContext>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match ctx.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
