use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fixed validity window for issued tokens.
pub const TOKEN_TTL_DAYS: i64 = 2;

/// Claims the authorization gate requires from a verified token. Issued
/// payloads may carry additional fields; the gate only cares about the
/// identity and the expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token payload must be a JSON object")]
    InvalidPayload(String),
    #[error("invalid or expired token")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("signing secret is not configured")]
    MissingSecret,
}

/// Sign an arbitrary caller-supplied payload into a bearer token valid for
/// two days. The payload is echoed into the claims verbatim; `iat` and `exp`
/// are stamped over any caller-supplied values.
pub fn issue_token(payload: Value, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let Value::Object(mut claims) = payload else {
        return Err(AuthError::InvalidPayload(
            "token payload must be a JSON object".to_string(),
        ));
    };

    let now = Utc::now();
    let exp = now + Duration::days(TOKEN_TTL_DAYS);
    claims.insert("iat".to_string(), Value::from(now.timestamp()));
    claims.insert("exp".to_string(), Value::from(exp.timestamp()));

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify a token's signature and expiry and decode its identity claim.
/// Tokens without an `email` field fail validation.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
