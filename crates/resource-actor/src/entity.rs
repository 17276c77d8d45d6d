//! # ResourceEntity Trait
//!
//! The `ResourceEntity` trait is the contract every stored resource implements so that the
//! generic [`ResourceActor`](crate::ResourceActor) can own it. It names the id type, the
//! create/update DTOs, the injected context and the error type, and exposes the lifecycle
//! hooks (`on_create`, `on_update`, `on_delete`) the actor calls around each mutation.
//!
//! # Provided Methods (Hooks)
//! - [`ResourceEntity::on_create`]
//! - [`ResourceEntity::on_delete`]
//!
//! Both default to `Ok(())`. Only `on_update` must be written by hand, because only the
//! entity knows how an update DTO applies to its state.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource must implement to be managed by a `ResourceActor`.
///
/// # Id allocation
/// The actor allocates ids from a `u64` counter that starts at 1 and only moves forward,
/// converting each value with `From<u64>`. The `Ord` implementation on `Id` must agree
/// with that numeric order: `list` returns entities sorted by id, which is how creation
/// order is preserved.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can await other clients. The `Context` value is
/// handed to `run()` rather than `new()`, which lets actors be wired after construction.
#[async_trait]
pub trait ResourceEntity: Clone + Debug + Send + Sync + 'static {
    /// Unique identifier, allocated by the actor.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u64>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// Error raised by construction and by the hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the allocated id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is inserted.
    /// An error here discards the entity; the allocated id is not handed out again.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update to the stored entity.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. An error aborts the whole removal.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
