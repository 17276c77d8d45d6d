//! # Resource Service
//!
//! A permission-checked CRUD service over four resource kinds: orders, BOMs, products and
//! users.
//!
//! ## Request Flow
//!
//! ```text
//! Request ──> Router ──> Authorizer ──> ResourceHandlerSet ──> store actor
//!   (method, path)   (permission)      (list/detail/create/     (one per kind)
//!                                       edit/remove)
//! ```
//!
//! ## Core Components
//!
//! - **[router]**: `(method, path)` to endpoint, with `{param}` binding and a route catalog.
//! - **[auth]**: permissions, principals and the [`Authorizer`](auth::Authorizer) gate.
//! - **[handlers]**: one [`ResourceHandlerSet`](handlers::ResourceHandlerSet) per kind.
//! - **[store]**: one [`ResourceActor`](resource_actor::ResourceActor) per kind.
//! - **[lifecycle]**: [`ResourceSystem`](lifecycle::ResourceSystem) startup and shutdown.
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_service::auth::Principal;
//! use resource_service::config::ServiceConfig;
//! use resource_service::lifecycle::ResourceSystem;
//! use resource_service::request::Request;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let system = ResourceSystem::new(&ServiceConfig::default()).unwrap();
//!     let admin = Principal::new("admin").with_permission("*");
//!
//!     let created = system
//!         .service()
//!         .handle(Request::post_json("/orders/create", admin.clone(), &json!({"sku": "A-1"})))
//!         .await;
//!     assert_eq!(created.body["id"], 1);
//!
//!     let detail = system.service().handle(Request::get("/orders/1", admin)).await;
//!     assert_eq!(detail.body["payload"]["sku"], "A-1");
//!
//!     system.shutdown().await.unwrap();
//! }
//! ```

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod handlers;
pub mod lifecycle;
pub mod model;
pub mod request;
pub mod router;
pub mod routes;
pub mod store;
