use std::any::Any;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::AuthError;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Error body shared by every failing endpoint:
/// `{"error": <title>, "errors": [<messages>]}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub errors: Vec<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, errors: Vec<String>) -> Self {
        Self { status, error: title.into(), errors }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", vec![message.into()])
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "errors": self.errors });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", vec![m]),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, "Conflict", vec![m]),
            e @ ServiceError::InvalidTransition { .. } => {
                Self::new(StatusCode::CONFLICT, "Invalid Transition", vec![e.to_string()])
            }
            ServiceError::UnexpectedFileType(m) => Self::new(StatusCode::BAD_REQUEST, "Unexpected File Type", vec![m]),
            e @ (ServiceError::Validation(_) | ServiceError::Model(models::errors::ModelError::Validation(_))) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", e.into_messages())
            }
            e => {
                error!(error = %e, "internal_error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", vec![e.to_string()])
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        warn!(code = e.code(), error = %e, "unauthorized");
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", vec![e.to_string()])
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        let status = match r {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::new(status, "Bad Request", vec![r.body_text()])
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for JsonApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<MultipartRejection> for JsonApiError {
    fn from(r: MultipartRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<MultipartError> for JsonApiError {
    fn from(e: MultipartError) -> Self { Self::new(e.status(), "Bad Request", vec![e.body_text()]) }
}

/// Turn a handler panic into the usual JSON error body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "handler_panicked");
    JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", vec!["internal server error".into()]).into_response()
}
