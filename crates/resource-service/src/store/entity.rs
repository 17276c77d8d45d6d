//! [`ResourceEntity`] implementation for [`Resource`].
//!
//! The store's own kind is the actor context, so a create request that was routed to the
//! wrong store is refused instead of being filed under the wrong type.

use super::ResourceError;
use crate::model::{NewResource, Payload, Resource, ResourceId, ResourceKind};
use async_trait::async_trait;
use resource_actor::ResourceEntity;

#[async_trait]
impl ResourceEntity for Resource {
    type Id = ResourceId;
    type Create = NewResource;
    type Update = Payload;
    type Context = ResourceKind;
    type Error = ResourceError;

    fn from_create_params(id: ResourceId, params: NewResource) -> Result<Self, ResourceError> {
        Ok(Self {
            id,
            kind: params.kind,
            payload: params.payload,
        })
    }

    async fn on_create(&mut self, store_kind: &ResourceKind) -> Result<(), ResourceError> {
        if self.kind != *store_kind {
            return Err(ResourceError::KindMismatch {
                expected: *store_kind,
                found: self.kind,
            });
        }
        Ok(())
    }

    /// Edits replace the payload wholesale; the id and kind never change.
    async fn on_update(&mut self, payload: Payload, _: &ResourceKind) -> Result<(), ResourceError> {
        self.payload = payload;
        Ok(())
    }
}
