//! The request pipeline: route, authorize, handle, respond.

use crate::errors::ServiceError;
use crate::handlers::ResourceHandlerSet;
use crate::model::ResourceKind;
use crate::request::{Request, Response};
use crate::router::Router;
use crate::routes::Endpoint;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, instrument, warn};

/// Routes requests to the handler set of the matched resource kind.
#[derive(Clone)]
pub struct ResourceService {
    router: Router<Endpoint>,
    handlers: HashMap<ResourceKind, ResourceHandlerSet>,
}

impl ResourceService {
    pub fn new(router: Router<Endpoint>, handlers: impl IntoIterator<Item = ResourceHandlerSet>) -> Self {
        Self {
            router,
            handlers: handlers.into_iter().map(|h| (h.kind(), h)).collect(),
        }
    }

    pub fn router(&self) -> &Router<Endpoint> {
        &self.router
    }

    #[instrument(
        name = "dispatch",
        skip(self, request),
        fields(method = %request.method, path = %request.path, principal = request.principal.id())
    )]
    pub async fn dispatch(&self, request: &Request) -> Result<Value, ServiceError> {
        let resolved = self.router.resolve(&request.method, &request.path)?;
        let endpoint = resolved.route.endpoint;

        let handlers = self.handlers.get(&endpoint.kind).ok_or_else(|| {
            error!(kind = %endpoint.kind, "No handler set registered");
            ServiceError::Internal(format!("no handler set for {}", endpoint.kind))
        })?;

        handlers
            .handle(
                &request.principal,
                resolved.route.permission.as_ref(),
                endpoint.operation,
                &resolved.params,
                &request.body,
            )
            .await
    }

    /// [`dispatch`](Self::dispatch) with the outcome rendered as a status and JSON body.
    pub async fn handle(&self, request: Request) -> Response {
        let result = self.dispatch(&request).await;
        if let Err(e) = &result {
            warn!(
                method = %request.method,
                path = %request.path,
                status = e.status().as_u16(),
                error = e.error_kind(),
                "Request failed"
            );
        }
        Response::from(result)
    }
}
