//! Errors at the request boundary and their HTTP mapping.

use crate::auth::{AuthzError, Permission};
use crate::model::ResourceKind;
use crate::router::RouterError;
use http::{Method, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("no route for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error("missing permission '{0}'")]
    PermissionDenied(Permission),

    #[error("{kind} resource '{id}' not found")]
    ResourceNotFound { kind: ResourceKind, id: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// A store fault. The detail is logged, never returned to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::RouteNotFound { .. } | ServiceError::ResourceNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            ServiceError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ServiceError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_kind(&self) -> &'static str {
        match self {
            ServiceError::RouteNotFound { .. } => "RouteNotFound",
            ServiceError::PermissionDenied(_) => "PermissionDenied",
            ServiceError::ResourceNotFound { .. } => "ResourceNotFound",
            ServiceError::InvalidPayload(_) => "InvalidPayload",
            ServiceError::Internal(_) => "Internal",
        }
    }

    /// `{"status", "error", "message"}`.
    pub fn to_body(&self) -> Value {
        let message = match self {
            ServiceError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        json!({
            "status": self.status().as_u16(),
            "error": self.error_kind(),
            "message": message,
        })
    }
}

impl From<AuthzError> for ServiceError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::Forbidden(permission) => ServiceError::PermissionDenied(permission),
        }
    }
}

impl From<RouterError> for ServiceError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::NotFound { method, path } => ServiceError::RouteNotFound { method, path },
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
