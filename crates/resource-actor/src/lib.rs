//! # Resource Actor
//!
//! Building blocks for owning in-memory resource stores behind actors. Each resource type
//! gets one [`ResourceActor`] running in its own Tokio task; the rest of the program talks
//! to it through a cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ResourceEntity`]) - what is stored and how updates apply
//! 2. **Runtime Layer** ([`ResourceActor`]) - id allocation, the store, request processing
//! 3. **Interface Layer** ([`ResourceClient`]) - typed async calls over channels
//!
//! ## Concurrency Model
//!
//! - Each actor owns its store outright; nothing else can reach it.
//! - Requests are processed **sequentially**, so creates, updates and deletes on one
//!   resource type never interleave, and a `list` always returns a whole snapshot.
//! - Separate actors run in **parallel** with no shared locks.
//! - Dropping every client closes the channel; the actor then logs its final size and
//!   returns from `run()`.
//!
//! ## Lifecycle
//!
//! ```text
//! create(params) --> Present --update--> Present --delete--> Absent
//! ```
//!
//! Ids are allocated from a counter that never goes backwards, so an id removed from the
//! store is never reused.
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ResourceActor, ResourceEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Item { id: u64, name: String }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("item error")]
//! struct ItemError;
//!
//! #[async_trait]
//! impl ResourceEntity for Item {
//!     type Id = u64;
//!     type Create = String;
//!     type Update = String;
//!     type Context = ();
//!     type Error = ItemError;
//!
//!     fn from_create_params(id: u64, name: String) -> Result<Self, ItemError> {
//!         Ok(Self { id, name })
//!     }
//!
//!     async fn on_update(&mut self, name: String, _ctx: &()) -> Result<(), ItemError> {
//!         self.name = name;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Item>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let item = client.create("widget".into()).await.unwrap();
//!     client.update(item.id, "gadget".into()).await.unwrap();
//!     client.delete(item.id).await.unwrap();
//!     assert!(matches!(client.get(item.id).await, Err(FrameworkError::NotFound(_))));
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers client requests from scripted expectations, so code that
//! sits in front of a store can be tested without one.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ResourceEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
