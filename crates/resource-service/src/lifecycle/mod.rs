//! # System Lifecycle
//!
//! [`ResourceSystem`] wires the whole service together at startup and tears it down at
//! shutdown.
//!
//! ## Startup
//!
//! 1. One store actor per [`ResourceKind`](crate::model::ResourceKind), spawned with its
//!    own kind as context.
//! 2. One [`ResourceHandlerSet`](crate::handlers::ResourceHandlerSet) per kind, holding
//!    that store's client and the shared authorizer.
//! 3. The route table, built under the configured base path.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the service** - this drops every store client it holds
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Actors log their final size** and return from `run()`
//! 4. **Await completion** - every actor task is joined
//!
//! Clones of the service handed out with [`ResourceSystem::service`] hold store clients
//! too; drop them before calling [`ResourceSystem::shutdown`] or it will wait for them.

pub mod resource_system;

pub use resource_system::*;
