//! Maps `(method, path)` to a registered endpoint and its required permission.
//!
//! The router is built once at startup and is read-only afterwards. Resolution picks the
//! most specific matching pattern: at the first position where two candidates differ, a
//! literal beats a `{param}`.
//!
//! Literal segments are reserved across methods: when a pattern registered under another
//! method matches the path more specifically than every candidate for the requested
//! method, the path belongs to that other route and resolution fails. `GET /orders/edit`
//! is therefore not found when only `POST /orders/edit` and `GET /orders/{id}` exist.

pub mod pattern;

pub use pattern::{split_path, PathParams, PathPattern, Segment};

use crate::auth::Permission;
use http::Method;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("route {method} {pattern} is already registered")]
    DuplicateRoute { method: Method, pattern: String },

    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no route for {method} {path}")]
    NotFound { method: Method, path: String },
}

/// A registered route: method, path pattern, optional permission, and the endpoint it
/// dispatches to.
#[derive(Debug, Clone)]
pub struct Route<E> {
    pub method: Method,
    pub pattern: PathPattern,
    pub permission: Option<Permission>,
    pub endpoint: E,
}

/// A successful resolution.
#[derive(Debug)]
pub struct Resolved<'r, E> {
    pub route: &'r Route<E>,
    pub params: PathParams,
}

/// One row of [`Router::catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub permission: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Router<E> {
    routes: Vec<Route<E>>,
}

impl<E> Default for Router<E> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<E> Router<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. A second route with the same method and pattern shape is rejected,
    /// even when its parameter names differ.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        permission: Option<Permission>,
        endpoint: E,
    ) -> Result<(), RouterError> {
        let pattern = PathPattern::parse(pattern)?;
        self.insert(method, pattern, permission, endpoint)
    }

    /// Registration helper that prefixes every pattern with `prefix`.
    pub fn scope<'a>(&'a mut self, prefix: &str) -> Scope<'a, E> {
        Scope {
            router: self,
            prefix: prefix.to_string(),
        }
    }

    fn insert(
        &mut self,
        method: Method,
        pattern: PathPattern,
        permission: Option<Permission>,
        endpoint: E,
    ) -> Result<(), RouterError> {
        if self
            .routes
            .iter()
            .any(|r| r.method == method && r.pattern.same_shape(&pattern))
        {
            return Err(RouterError::DuplicateRoute {
                method,
                pattern: pattern.to_string(),
            });
        }
        debug!(method = %method, path = %pattern, "Registered route");
        self.routes.push(Route {
            method,
            pattern,
            permission,
            endpoint,
        });
        Ok(())
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Result<Resolved<'_, E>, RouterError> {
        let segments = split_path(path);
        let mut best: Option<Resolved<'_, E>> = None;

        for route in self.routes.iter().filter(|r| &r.method == method) {
            let Some(params) = route.pattern.match_segments(&segments) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some(current) => route.pattern.more_specific_than(&current.route.pattern),
            };
            if better {
                best = Some(Resolved { route, params });
            }
        }

        let not_found = || RouterError::NotFound {
            method: method.clone(),
            path: path.to_string(),
        };
        let best = best.ok_or_else(not_found)?;

        let claimed_elsewhere = self.routes.iter().any(|r| {
            &r.method != method
                && r.pattern.more_specific_than(&best.route.pattern)
                && r.pattern.match_segments(&segments).is_some()
        });
        if claimed_elsewhere {
            return Err(not_found());
        }
        Ok(best)
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<E>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<E: Display> Router<E> {
    /// Every registered route, in registration order.
    pub fn catalog(&self) -> Vec<EndpointInfo> {
        self.routes
            .iter()
            .map(|route| EndpointInfo {
                method: route.method.to_string(),
                path: route.pattern.to_string(),
                permission: route.permission.as_ref().map(ToString::to_string),
                name: route.endpoint.to_string(),
            })
            .collect()
    }

    /// Catalog rows whose path, name, method or permission contains `query`,
    /// case-insensitively. An empty query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<EndpointInfo> {
        let query = query.trim().to_lowercase();
        self.catalog()
            .into_iter()
            .filter(|info| {
                query.is_empty()
                    || info.path.to_lowercase().contains(&query)
                    || info.name.to_lowercase().contains(&query)
                    || info.method.to_lowercase().contains(&query)
                    || info
                        .permission
                        .as_deref()
                        .is_some_and(|p| p.to_lowercase().contains(&query))
            })
            .collect()
    }
}

/// Registers routes under a common path prefix.
pub struct Scope<'a, E> {
    router: &'a mut Router<E>,
    prefix: String,
}

impl<E> Scope<'_, E> {
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        permission: Option<Permission>,
        endpoint: E,
    ) -> Result<&mut Self, RouterError> {
        let pattern = PathPattern::join(&self.prefix, pattern)?;
        self.router.insert(method, pattern, permission, endpoint)?;
        Ok(self)
    }
}
