use axum::{extract::Extension, response::Json};
use serde_json::{json, Value};

use crate::auth::issue_token;
use crate::error::ApiError;
use crate::AppContext;

/// POST /api/jwt - sign the submitted payload into a bearer token valid
/// for two days.
///
/// This endpoint performs no credential check of its own; it signs
/// whatever object it is given. The frontend calls it after its own login
/// flow completes.
pub async fn issue(
    Extension(ctx): Extension<AppContext>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let token = issue_token(payload, &ctx.config.security.jwt_secret)?;
    Ok(Json(json!({ "token": format!("Bearer {}", token) })))
}
