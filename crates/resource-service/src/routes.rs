//! The route table: every CRUD endpoint for every resource kind.

use crate::auth::Permission;
use crate::model::ResourceKind;
use crate::router::{Router, RouterError};
use http::Method;
use std::fmt::Display;

/// The five operations a [`ResourceHandlerSet`](crate::handlers::ResourceHandlerSet) serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Detail,
    Create,
    Edit,
    Remove,
}

impl Operation {
    /// Permission action for this operation. `Detail` is open.
    pub fn action(self) -> Option<&'static str> {
        match self {
            Operation::List => Some("list"),
            Operation::Detail => None,
            Operation::Create => Some("add"),
            Operation::Edit => Some("edit"),
            Operation::Remove => Some("remove"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Detail => "detail",
            Operation::Create => "create",
            Operation::Edit => "edit",
            Operation::Remove => "remove",
        }
    }

    /// `(method, path under the kind's segment)` for every alias of this operation.
    fn paths(self) -> Vec<(Method, &'static str)> {
        match self {
            Operation::List => vec![(Method::GET, "/list"), (Method::GET, "/")],
            Operation::Detail => vec![(Method::GET, "/detail/{id}"), (Method::GET, "/{id}")],
            Operation::Create => vec![(Method::POST, "/create"), (Method::POST, "/add")],
            Operation::Edit => vec![(Method::POST, "/edit")],
            Operation::Remove => vec![(Method::POST, "/remove")],
        }
    }

    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Detail,
        Operation::Create,
        Operation::Edit,
        Operation::Remove,
    ];
}

/// What a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub kind: ResourceKind,
    pub operation: Operation,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.kind.segment(), self.operation.name())
    }
}

/// Builds the full route table under `base_path` (may be empty).
pub fn build_router(base_path: &str) -> Result<Router<Endpoint>, RouterError> {
    let mut router = Router::new();
    for kind in ResourceKind::ALL {
        let prefix = format!("{}/{}", base_path, kind.segment());
        let mut scope = router.scope(&prefix);
        for operation in Operation::ALL {
            let permission = operation
                .action()
                .map(|action| Permission::for_resource(kind, action));
            for (method, path) in operation.paths() {
                scope.register(
                    method,
                    path,
                    permission.clone(),
                    Endpoint { kind, operation },
                )?;
            }
        }
    }
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_gets_every_alias() {
        let router = build_router("").unwrap();
        assert_eq!(router.len(), ResourceKind::ALL.len() * 8);
    }

    #[test]
    fn routes_carry_canonical_permissions() {
        let router = build_router("/api").unwrap();

        let resolved = router.resolve(&Method::POST, "/api/products/add").unwrap();
        assert_eq!(
            resolved.route.endpoint,
            Endpoint { kind: ResourceKind::Product, operation: Operation::Create }
        );
        assert_eq!(
            resolved.route.permission,
            Some(Permission::from("products:add"))
        );

        let resolved = router.resolve(&Method::GET, "/api/users/detail/3").unwrap();
        assert_eq!(resolved.route.permission, None);
        assert_eq!(resolved.params.get("id"), Some("3"));
    }

    #[test]
    fn bare_collection_path_lists() {
        let router = build_router("").unwrap();
        for path in ["/orders", "/orders/", "/orders/list"] {
            let resolved = router.resolve(&Method::GET, path).unwrap();
            assert_eq!(resolved.route.endpoint.operation, Operation::List, "{path}");
        }
    }

    #[test]
    fn every_catalog_route_resolves_to_itself() {
        for base in ["", "/api"] {
            let router = build_router(base).unwrap();
            for info in router.catalog() {
                let method: Method = info.method.parse().unwrap();
                let path = info.path.replace("{id}", "7");

                let resolved = router.resolve(&method, &path).unwrap();
                assert_eq!(resolved.route.endpoint.to_string(), info.name, "{method} {path}");
                assert_eq!(
                    resolved.route.permission.as_ref().map(ToString::to_string),
                    info.permission,
                    "{method} {path}"
                );
                if info.path.contains("{id}") {
                    assert_eq!(resolved.params.get("id"), Some("7"));
                }
            }
        }
    }

    #[test]
    fn endpoint_names() {
        let endpoint = Endpoint { kind: ResourceKind::Bom, operation: Operation::Remove };
        assert_eq!(endpoint.to_string(), "bom.remove");
    }
}
