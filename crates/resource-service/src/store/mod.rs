//! # Resource Stores
//!
//! One [`ResourceActor`] per [`ResourceKind`], each owning every [`Resource`] of that kind.
//!
//! ## Structure
//!
//! - [`entity`] - [`ResourceEntity`](resource_actor::ResourceEntity) implementation for [`Resource`]
//! - [`error`] - [`ResourceError`] raised by the entity hooks
//! - [`new()`] - factory that creates a store actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use resource_service::model::{NewResource, Payload, ResourceKind};
//! use resource_service::store;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = store::new(ResourceKind::Bom, 8);
//!     // The kind is the actor's context: creates for other kinds are refused
//!     tokio::spawn(actor.run(ResourceKind::Bom));
//!
//!     let created = client
//!         .create(NewResource { kind: ResourceKind::Bom, payload: Payload::new() })
//!         .await
//!         .unwrap();
//!     assert_eq!(created.id.0, 1);
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Resource, ResourceKind};
use resource_actor::{ResourceActor, ResourceClient};

/// Client handle for one resource store.
pub type StoreClient = ResourceClient<Resource>;

/// Creates the store actor for `kind` and its client. Run it with `actor.run(kind)`.
pub fn new(kind: ResourceKind, channel_capacity: usize) -> (ResourceActor<Resource>, StoreClient) {
    let (actor, client) = ResourceActor::new(channel_capacity);
    (actor.with_label(kind.segment()), client)
}
