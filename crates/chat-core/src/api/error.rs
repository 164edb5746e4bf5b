//! HTTP error mapping
//!
//! Converts service errors and extractor rejections into JSON responses of
//! the form `{"detail": ...}`.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::error::Error;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            tracing::warn!(code = self.code(), "{}", self);
        } else {
            tracing::error!(
                code = self.code(),
                error = %self,
                suggestion = ?self.suggestion(),
                "Request failed"
            );
        }

        match self {
            Error::ChatNotFound(_) => {
                detail(StatusCode::NOT_FOUND, Value::String(self.to_string()))
            }
            Error::Validation {
                location,
                field,
                message,
            } => {
                let mut loc = vec![Value::String(location.to_string())];
                if !field.is_empty() {
                    loc.push(Value::String(field));
                }
                detail(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!([{ "loc": loc, "msg": message, "type": "value_error" }]),
                )
            }
            Error::DatabaseError(_) => detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                Value::String("Internal server error".to_string()),
            ),
        }
    }
}

fn detail(status: StatusCode, detail: Value) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

pub(crate) fn body_rejection(rejection: JsonRejection) -> Error {
    Error::invalid_body("", rejection.body_text())
}

pub(crate) fn query_rejection(rejection: QueryRejection) -> Error {
    Error::invalid_query("", rejection.body_text())
}

pub(crate) fn path_rejection(rejection: PathRejection) -> Error {
    Error::invalid_path("chat_id", rejection.body_text())
}
