use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::Value;

use crate::api::format::{document_to_json, documents_to_json};
use crate::error::ApiError;
use crate::store::ContentKind;
use crate::AppContext;

/// Shared passthrough for the read-only content collections: one
/// unfiltered find per request, serialized straight back as JSON.
async fn list(ctx: AppContext, kind: ContentKind) -> Result<Json<Value>, ApiError> {
    let docs = ctx.store.list_content(kind).await?;
    Ok(Json(documents_to_json(docs)))
}

/// GET /api/banner-contents
pub async fn banner_contents(
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::Banners).await
}

/// GET /api/features
pub async fn features(Extension(ctx): Extension<AppContext>) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::Features).await
}

/// GET /api/hiw-contents
pub async fn hiw_contents(Extension(ctx): Extension<AppContext>) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::HowItWorks).await
}

/// GET /api/gallery
pub async fn gallery(Extension(ctx): Extension<AppContext>) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::Gallery).await
}

/// GET /api/testimonials
pub async fn testimonials(Extension(ctx): Extension<AppContext>) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::Testimonials).await
}

/// GET /api/blogs
pub async fn blogs(Extension(ctx): Extension<AppContext>) -> Result<Json<Value>, ApiError> {
    list(ctx, ContentKind::Blogs).await
}

/// GET /api/blogs/:id - single blog or JSON null when absent
pub async fn blog_by_id(
    Path(id): Path<String>,
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let blog = ctx.store.blog_by_id(&id).await?;
    Ok(Json(blog.map(document_to_json).unwrap_or(Value::Null)))
}
