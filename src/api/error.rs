//! HTTP mapping for domain errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::UnresolvedReference { .. } => StatusCode::BAD_REQUEST,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // Lookups that miss answer with a bare status
            DomainError::NotFound | DomainError::UnresolvedReference { .. } => {
                tracing::debug!("{}", self);
                status.into_response()
            }
            DomainError::Database(_) => {
                tracing::error!("{}", self);
                (status, Json(json!({ "error": self.to_string() }))).into_response()
            }
            _ => (status, Json(json!({ "error": self.to_string() }))).into_response(),
        }
    }
}
