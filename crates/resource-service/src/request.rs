//! The transport-neutral request and response handed to [`ResourceService`](crate::dispatch::ResourceService).
//!
//! A host web server converts its own request type into a [`Request`]; this crate never
//! parses HTTP itself.

use crate::auth::Principal;
use crate::errors::ServiceError;
use http::{Method, StatusCode};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Request path, optionally with a query string (ignored).
    pub path: String,
    pub principal: Principal,
    /// Raw body bytes, decoded by the handler that needs them.
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, principal: Principal) -> Self {
        Self {
            method,
            path: path.into(),
            principal,
            body: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>, principal: Principal) -> Self {
        Self::new(Method::GET, path, principal)
    }

    pub fn post(path: impl Into<String>, principal: Principal, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Self::new(Method::POST, path, principal)
        }
    }

    pub fn post_json(path: impl Into<String>, principal: Principal, body: &Value) -> Self {
        Self::post(path, principal, body.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

impl Response {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn from_error(error: &ServiceError) -> Self {
        Self {
            status: error.status(),
            body: error.to_body(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl From<Result<Value, ServiceError>> for Response {
    fn from(result: Result<Value, ServiceError>) -> Self {
        match result {
            Ok(body) => Response::ok(body),
            Err(error) => Response::from_error(&error),
        }
    }
}
