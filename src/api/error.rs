use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::FieldError;
use crate::domain::{CsrError, DomainError};
use crate::registry::RegistryError;

#[derive(Debug)]
pub enum ApiError {
    /// Registry failure forwarded with its own status and body
    Upstream { status: StatusCode, body: Value },
    Validation(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Upstream { status, .. } => write!(f, "Upstream error: HTTP {}", status),
            ApiError::Validation(errors) => write!(f, "Validation error: {} field(s)", errors.len()),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Upstream { status, body } => {
                warn!(status = status.as_u16(), "Forwarding registry error");
                return (status, Json(body)).into_response();
            }
            ApiError::Validation(errors) => {
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors })))
                    .into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadGateway(msg) => {
                error!("Registry unreachable: {}", msg);
                (StatusCode::BAD_GATEWAY, "bad_gateway", msg)
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Remote { status, body } => match StatusCode::from_u16(status) {
                Ok(status) => ApiError::Upstream { status, body },
                Err(_) => ApiError::BadGateway(format!("Registry returned invalid status {}", status)),
            },
            RegistryError::MissingRecord { .. } => ApiError::NotFound(err.to_string()),
            RegistryError::InvalidPath { .. } => ApiError::BadRequest(err.to_string()),
            RegistryError::Transport(_)
            | RegistryError::Decode(_)
            | RegistryError::MalformedRecord { .. } => ApiError::BadGateway(err.to_string()),
        }
    }
}

impl From<CsrError> for ApiError {
    fn from(err: CsrError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Registry(e) => e.into(),
            DomainError::Csr(e) => e.into(),
            DomainError::Payload(e) => ApiError::Internal(format!("JSON error: {}", e)),
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::Validation(vec![err])
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_error_is_forwarded_verbatim() {
        let upstream = json!({
            "stid": "20240101-app1-1",
            "status": { "code": "E0105", "text": "Contact not found", "type": "ERROR" }
        });
        let err: ApiError = RegistryError::Remote {
            status: 404,
            body: upstream.clone(),
        }
        .into();

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, upstream);
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let err = ApiError::Validation(vec![
            FieldError::new("city", "city is required"),
            FieldError::new("type", "type must be one of PERSON, ORG, ROLE"),
        ]);

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({ "errors": [
                { "city": "city is required" },
                { "type": "type must be one of PERSON, ORG, ROLE" }
            ] })
        );
    }

    #[test]
    fn test_missing_record_maps_to_not_found() {
        let err: ApiError = RegistryError::MissingRecord {
            resource: "contact",
            id: "7".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_invalid_path_maps_to_bad_request() {
        let err: ApiError = RegistryError::InvalidPath {
            path: "/user/../../_lock".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
