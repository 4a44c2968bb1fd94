use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Convert a stored document into the public wire format. ObjectIds are
/// rendered as plain hex strings and timestamps as RFC 3339, never as
/// extended-JSON wrappers like `{"$oid": ...}`.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn object_ids_become_hex_strings() {
        let oid = ObjectId::new();
        let json = document_to_json(doc! { "_id": oid, "name": "Robot Kit" });
        assert_eq!(json["_id"], json!(oid.to_hex()));
        assert_eq!(json["name"], json!("Robot Kit"));
    }

    #[test]
    fn scalars_pass_through_unwrapped() {
        let json = document_to_json(doc! {
            "price": 24.99,
            "availableQty": 12_i64,
            "inStock": true,
            "notes": Bson::Null,
        });
        assert_eq!(json["price"], json!(24.99));
        assert_eq!(json["availableQty"], json!(12));
        assert_eq!(json["inStock"], json!(true));
        assert_eq!(json["notes"], Value::Null);
    }

    #[test]
    fn nested_documents_and_arrays_are_converted() {
        let oid = ObjectId::new();
        let json = document_to_json(doc! {
            "tags": ["stem", "age-5+"],
            "meta": { "relatedId": oid },
        });
        assert_eq!(json["tags"], json!(["stem", "age-5+"]));
        assert_eq!(json["meta"]["relatedId"], json!(oid.to_hex()));
    }
}
