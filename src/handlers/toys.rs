use axum::{
    extract::{Extension, Path, Query},
    response::Json,
};
use serde_json::{json, Value};

use crate::api::format::{document_to_json, documents_to_json};
use crate::error::ApiError;
use crate::store::query::ToyQuery;
use crate::store::ListParams;
use crate::AppContext;

/// GET /api/toys - paginated, sorted, optionally text-filtered catalog
/// listing. Returns the requested page together with the total count of
/// matching documents so the caller can compute page counts.
pub async fn list_toys(
    Query(params): Query<ListParams>,
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    let query = ToyQuery::from_params(&params, &ctx.config.api);
    let (toys, total) = ctx.store.query_toys(&query).await?;

    Ok(Json(json!({
        "toys": documents_to_json(toys),
        "total": total,
    })))
}

/// GET /api/toys/category/:subCategory - exact-match listing
pub async fn toys_by_category(
    Path(sub_category): Path<String>,
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    let toys = ctx.store.toys_by_subcategory(&sub_category).await?;
    Ok(Json(documents_to_json(toys)))
}

/// GET /api/toys/:id - single toy, or JSON null when absent.
///
/// Absence is deliberately not a 404 here; the related-toys endpoint is
/// the one that signals not-found. Clients depend on this asymmetry.
pub async fn toy_by_id(
    Path(id): Path<String>,
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let toy = ctx.store.toy_by_id(&id).await?;
    Ok(Json(toy.map(document_to_json).unwrap_or(Value::Null)))
}

/// GET /api/toys/related-toys/:id - toys sharing the base toy's
/// subCategory, excluding the base toy; 404 when the base toy is missing.
pub async fn related_toys(
    Path(id): Path<String>,
    Extension(ctx): Extension<AppContext>,
) -> Result<Json<Value>, ApiError> {
    let id = super::parse_object_id(&id)?;

    let Some(base) = ctx.store.toy_by_id(&id).await? else {
        return Err(ApiError::not_found("No toys found!"));
    };

    let related = ctx.store.related_toys(&base).await?;
    Ok(Json(documents_to_json(related)))
}
