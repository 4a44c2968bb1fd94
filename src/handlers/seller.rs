use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use mongodb::bson::{self, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::format::{bson_to_json, documents_to_json};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::store::SortOrder;
use crate::AppContext;

#[derive(Debug, Default, Deserialize)]
pub struct SellerListParams {
    pub sort: Option<String>,
}

/// Partial update body for a toy. Only these three fields are mutable;
/// anything else in the body is ignored, keeping sellerEmail and category
/// immutable through this operation.
#[derive(Debug, Deserialize)]
pub struct ToyPatch {
    pub price: Option<Value>,
    #[serde(rename = "availableQty")]
    pub available_qty: Option<Value>,
    pub details: Option<Value>,
}

impl ToyPatch {
    /// Build the `$set` document from the fields actually present.
    fn into_set_doc(self) -> Result<Document, ApiError> {
        let mut set = Document::new();
        for (field, value) in [
            ("price", self.price),
            ("availableQty", self.available_qty),
            ("details", self.details),
        ] {
            if let Some(value) = value {
                let value = bson::to_bson(&value)
                    .map_err(|_| ApiError::bad_request(format!("Invalid value for {}", field)))?;
                set.insert(field, value);
            }
        }
        Ok(set)
    }
}

/// GET /api/seller/toys - the caller's own listings, exact-match on the
/// decoded token email, optional price sort, no pagination.
pub async fn list_toys(
    Query(params): Query<SellerListParams>,
    Extension(ctx): Extension<AppContext>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let sort = SortOrder::parse(params.sort.as_deref());
    let toys = ctx.store.seller_toys(&user.email, sort).await?;
    Ok(Json(documents_to_json(toys)))
}

/// POST /api/seller/toys - insert a new listing. The submitted
/// sellerEmail must equal the decoded token email; the token claim is the
/// ownership authority, the body field is only cross-checked.
pub async fn create_toy(
    Extension(ctx): Extension<AppContext>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if !payload.is_object() {
        return Err(ApiError::bad_request("Toy must be a JSON object"));
    }

    let seller_email = payload.get("sellerEmail").and_then(Value::as_str);
    if seller_email != Some(user.email.as_str()) {
        return Err(ApiError::forbidden(
            "sellerEmail must match the authenticated seller",
        ));
    }

    let toy = bson::to_document(&payload)
        .map_err(|_| ApiError::bad_request("Toy document could not be encoded"))?;
    let inserted_id = ctx.store.insert_toy(toy).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "insertedId": bson_to_json(inserted_id) })),
    ))
}

/// PUT /api/seller/toys/:id - replace price, availableQty and details on
/// a listing the caller owns. A valid token alone is not enough: updates
/// to someone else's toy are 403, updates to a missing toy report zero
/// matched documents.
pub async fn update_toy(
    Path(id): Path<String>,
    Extension(ctx): Extension<AppContext>,
    Extension(user): Extension<AuthUser>,
    Json(patch): Json<ToyPatch>,
) -> Result<Json<Value>, ApiError> {
    let id = super::parse_object_id(&id)?;

    let set = patch.into_set_doc()?;
    if set.is_empty() {
        return Err(ApiError::bad_request(
            "Request body contains no updatable fields",
        ));
    }

    let result = ctx.store.update_owned_toy(&id, &user.email, set).await?;
    if result.matched_count == 0 && ctx.store.toy_by_id(&id).await?.is_some() {
        return Err(ApiError::forbidden("Only the owning seller may modify this toy"));
    }

    Ok(Json(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /api/seller/toys/:id - remove a listing the caller owns.
/// Deleting a nonexistent id completes without error and reports a zero
/// deleted count.
pub async fn delete_toy(
    Path(id): Path<String>,
    Extension(ctx): Extension<AppContext>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let id = super::parse_object_id(&id)?;

    let result = ctx.store.delete_owned_toy(&id, &user.email).await?;
    if result.deleted_count == 0 && ctx.store.toy_by_id(&id).await?.is_some() {
        return Err(ApiError::forbidden("Only the owning seller may delete this toy"));
    }

    Ok(Json(json!({ "deletedCount": result.deleted_count })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn patch(body: Value) -> ToyPatch {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn patch_keeps_only_mutable_fields() {
        let set = patch(json!({
            "price": 19.5,
            "availableQty": 4,
            "details": "restocked",
            "sellerEmail": "intruder@example.com",
            "category": "STEM",
        }))
        .into_set_doc()
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set, doc! { "price": 19.5, "availableQty": 4_i64, "details": "restocked" });
    }

    #[test]
    fn patch_with_subset_of_fields_sets_only_those() {
        let set = patch(json!({ "price": 9.99 })).into_set_doc().unwrap();
        assert_eq!(set, doc! { "price": 9.99 });
    }

    #[test]
    fn empty_patch_produces_empty_set_doc() {
        let set = patch(json!({ "name": "immutable" })).into_set_doc().unwrap();
        assert!(set.is_empty());
    }
}
