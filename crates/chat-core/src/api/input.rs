//! Request input decoding
//!
//! Bodies are read as loose JSON and query strings as raw key/value pairs,
//! then each field is decoded on its own so a bad value is reported under
//! its own name (`["body", "title"]`, `["query", "limit"]`).

use std::collections::HashMap;

use serde_json::Value;

use crate::chat::model::DEFAULT_PAGE_LIMIT;
use crate::chat::{CreateChatRequest, CreateMessageRequest, Pagination};
use crate::{Error, Result};

fn required_string(body: &Value, field: &str) -> Result<String> {
    let object = body
        .as_object()
        .ok_or_else(|| Error::invalid_body("", "Input should be a valid dictionary"))?;

    match object.get(field) {
        None => Err(Error::invalid_body(field, "Field required")),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(Error::invalid_body(field, "Input should be a valid string")),
    }
}

fn optional_int(params: &HashMap<String, String>, name: &str, default: i64) -> Result<i64> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            Error::invalid_query(
                name,
                "Input should be a valid integer, unable to parse string as an integer",
            )
        }),
    }
}

/// Decode a `POST /chats` body
pub fn chat_request(body: &Value) -> Result<CreateChatRequest> {
    required_string(body, "title").map(CreateChatRequest::new)
}

/// Decode a `POST /chats/{chat_id}/messages` body
pub fn message_request(body: &Value) -> Result<CreateMessageRequest> {
    required_string(body, "text").map(CreateMessageRequest::new)
}

/// Decode `limit` and `offset`, falling back to the defaults when absent
pub fn pagination(params: &HashMap<String, String>) -> Result<Pagination> {
    let limit = optional_int(params, "limit", DEFAULT_PAGE_LIMIT)?;
    let offset = optional_int(params, "offset", 0)?;
    Ok(Pagination::new(limit, offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputLocation;
    use serde_json::json;

    fn location_of(result: Result<impl std::fmt::Debug>) -> (InputLocation, String) {
        match result {
            Err(Error::Validation {
                location, field, ..
            }) => (location, field),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_chat_request() {
        let request = chat_request(&json!({ "title": "  Hello  " })).unwrap();
        assert_eq!(request.title, "  Hello  ");
    }

    #[test]
    fn test_missing_field_names_field() {
        let (location, field) = location_of(chat_request(&json!({})));
        assert_eq!(location, InputLocation::Body);
        assert_eq!(field, "title");

        let (_, field) = location_of(message_request(&json!({ "title": "wrong" })));
        assert_eq!(field, "text");
    }

    #[test]
    fn test_wrong_type_names_field() {
        let (location, field) = location_of(chat_request(&json!({ "title": 42 })));
        assert_eq!(location, InputLocation::Body);
        assert_eq!(field, "title");
    }

    #[test]
    fn test_non_object_body() {
        let (location, field) = location_of(message_request(&json!(["text"])));
        assert_eq!(location, InputLocation::Body);
        assert!(field.is_empty());
    }

    #[test]
    fn test_pagination_defaults_and_values() {
        assert_eq!(pagination(&params(&[])).unwrap(), Pagination::default());
        assert_eq!(
            pagination(&params(&[("limit", "5"), ("offset", "10")])).unwrap(),
            Pagination::new(5, 10)
        );
        // Range checks belong to the service
        assert_eq!(
            pagination(&params(&[("offset", "-1")])).unwrap(),
            Pagination::new(20, -1)
        );
    }

    #[test]
    fn test_pagination_bad_value_names_parameter() {
        let (location, field) = location_of(pagination(&params(&[("limit", "abc")])));
        assert_eq!(location, InputLocation::Query);
        assert_eq!(field, "limit");

        let (_, field) = location_of(pagination(&params(&[("limit", "5"), ("offset", "x")])));
        assert_eq!(field, "offset");
    }
}
