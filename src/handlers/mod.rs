pub mod content;
pub mod seller;
pub mod token;
pub mod toys;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse a path identifier into an ObjectId, rejecting malformed input
/// before any store access.
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw)
        .map_err(|_| ApiError::bad_request(format!("Invalid identifier: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_hex_id_parses() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        let err = parse_object_id("not-an-id").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
