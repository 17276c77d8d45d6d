//! # Resource Handler Sets
//!
//! A [`ResourceHandlerSet`] serves list, detail, create, edit and remove for one resource
//! kind. It wraps that kind's [`StoreClient`] and the shared [`Authorizer`].
//!
//! Authorization always runs first: a denied request returns before anything is sent to
//! the store.

pub mod body;

use body::{parse_edit, parse_payload, parse_remove, path_id};
use crate::auth::{Authorizer, Permission, Principal};
use crate::errors::ServiceError;
use crate::model::{NewResource, Payload, Resource, ResourceId, ResourceKind};
use crate::router::PathParams;
use crate::routes::Operation;
use crate::store::StoreClient;
use resource_actor::FrameworkError;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

#[derive(Clone)]
pub struct ResourceHandlerSet {
    kind: ResourceKind,
    store: StoreClient,
    authorizer: Arc<dyn Authorizer>,
}

impl ResourceHandlerSet {
    pub fn new(kind: ResourceKind, store: StoreClient, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            kind,
            store,
            authorizer,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Authorizes `principal` for `required`, decodes the request and runs `operation`.
    pub async fn handle(
        &self,
        principal: &Principal,
        required: Option<&Permission>,
        operation: Operation,
        params: &PathParams,
        body: &[u8],
    ) -> Result<Value, ServiceError> {
        self.authorizer.require(principal, required)?;

        match operation {
            Operation::List => to_json(self.list().await?),
            Operation::Detail => {
                let id = path_id(self.kind, params)?;
                to_json(self.detail(id).await?)
            }
            Operation::Create => {
                let payload = parse_payload(body)?;
                to_json(self.create(payload).await?)
            }
            Operation::Edit => {
                let (id, payload) = parse_edit(body)?;
                to_json(self.edit(id, payload).await?)
            }
            Operation::Remove => {
                let ids = parse_remove(body)?;
                let removed = self.remove(ids).await?;
                Ok(json!({ "removed": removed }))
            }
        }
    }

    /// Every resource of this kind in creation order.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn list(&self) -> Result<Vec<Resource>, ServiceError> {
        let resources = self.store.list().await.map_err(|e| self.map_error(e))?;
        debug!(count = resources.len(), "Listed");
        Ok(resources)
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn detail(&self, id: ResourceId) -> Result<Resource, ServiceError> {
        self.store.get(id).await.map_err(|e| self.map_error(e))
    }

    #[instrument(skip(self, payload), fields(kind = %self.kind))]
    pub async fn create(&self, payload: Payload) -> Result<Resource, ServiceError> {
        let created = self
            .store
            .create(NewResource {
                kind: self.kind,
                payload,
            })
            .await
            .map_err(|e| self.map_error(e))?;
        info!(id = %created.id, "Resource created");
        Ok(created)
    }

    /// Replaces the payload of `id`. Absent ids leave the store untouched.
    #[instrument(skip(self, payload), fields(kind = %self.kind))]
    pub async fn edit(&self, id: ResourceId, payload: Payload) -> Result<Resource, ServiceError> {
        self.store
            .update(id, payload)
            .await
            .map_err(|e| self.map_error(e))
    }

    /// Removes all of `ids` or none of them.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn remove(&self, ids: Vec<ResourceId>) -> Result<Vec<ResourceId>, ServiceError> {
        let removed = self
            .store
            .delete_many(ids)
            .await
            .map_err(|e| self.map_error(e))?;
        info!(?removed, "Resources removed");
        Ok(removed)
    }

    fn map_error(&self, e: FrameworkError) -> ServiceError {
        match e {
            FrameworkError::NotFound(id) => ServiceError::ResourceNotFound {
                kind: self.kind,
                id,
            },
            other => {
                error!(kind = %self.kind, error = %other, "Store request failed");
                ServiceError::Internal(other.to_string())
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|e| {
        error!(error = %e, "Failed to serialize response");
        ServiceError::Internal(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PermissionAuthorizer;
    use resource_actor::mock::MockClient;

    fn resource(id: u64, name: &str) -> Resource {
        let mut payload = Payload::new();
        payload.insert("name".to_string(), json!(name));
        Resource {
            id: ResourceId(id),
            kind: ResourceKind::Order,
            payload,
        }
    }

    fn handlers(mock: &MockClient<Resource>) -> ResourceHandlerSet {
        ResourceHandlerSet::new(ResourceKind::Order, mock.client(), Arc::new(PermissionAuthorizer))
    }

    fn admin() -> Principal {
        Principal::new("admin").with_permission("*")
    }

    #[tokio::test]
    async fn denied_request_never_reaches_the_store() {
        let mock = MockClient::<Resource>::new();
        let handlers = handlers(&mock);
        let viewer = Principal::new("viewer").with_permission("orders:list");

        let result = handlers
            .handle(
                &viewer,
                Some(&Permission::from("orders:remove")),
                Operation::Remove,
                &PathParams::default(),
                br#"{"id": 1}"#,
            )
            .await;

        assert_eq!(
            result,
            Err(ServiceError::PermissionDenied("orders:remove".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn create_sends_the_handler_kind() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_create().return_ok(resource(1, "first"));
        let handlers = handlers(&mock);

        let value = handlers
            .handle(
                &admin(),
                Some(&Permission::from("orders:add")),
                Operation::Create,
                &PathParams::default(),
                br#"{"name": "first"}"#,
            )
            .await
            .unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["kind"], "orders");
        assert_eq!(value["payload"]["name"], "first");
        mock.verify();
    }

    #[tokio::test]
    async fn bad_body_is_rejected_before_the_store() {
        let mock = MockClient::<Resource>::new();
        let handlers = handlers(&mock);

        let result = handlers
            .handle(&admin(), None, Operation::Edit, &PathParams::default(), b"{}")
            .await;

        assert!(matches!(result, Err(ServiceError::InvalidPayload(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn store_not_found_maps_to_resource_not_found() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_update(ResourceId(4))
            .return_err(FrameworkError::NotFound("4".into()));
        let handlers = handlers(&mock);

        let result = handlers.edit(ResourceId(4), Payload::new()).await;

        assert_eq!(
            result,
            Err(ServiceError::ResourceNotFound {
                kind: ResourceKind::Order,
                id: "4".into()
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn store_faults_are_internal() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);
        let handlers = handlers(&mock);

        let result = handlers.list().await;

        assert!(matches!(result, Err(ServiceError::Internal(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn remove_reports_removed_ids() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_delete(vec![ResourceId(1), ResourceId(2)])
            .return_ok(vec![ResourceId(1), ResourceId(2)]);
        let handlers = handlers(&mock);

        let value = handlers
            .handle(
                &admin(),
                Some(&Permission::from("orders:remove")),
                Operation::Remove,
                &PathParams::default(),
                br#"{"ids": [1, 2]}"#,
            )
            .await
            .unwrap();

        assert_eq!(value, json!({ "removed": [1, 2] }));
        mock.verify();
    }
}
