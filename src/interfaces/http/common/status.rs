//! HTTP mapping for RPC `Status`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::interfaces::rpc::{Code, Status};

/// HTTP status used when a call fails with `code`.
pub fn http_status(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::NotFound => StatusCode::NOT_FOUND,
        Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        (http_status(self.code), Json(self)).into_response()
    }
}
