use super::Permission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The authenticated caller presented with a request.
///
/// Built per request from whatever upstream auth context the host provides; this crate
/// only reads the id and the granted permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    permissions: BTreeSet<Permission>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permissions: BTreeSet::new(),
        }
    }

    /// A caller with no grants. Only routes without a permission requirement are open to it.
    pub fn anonymous() -> Self {
        Self::new("anonymous")
    }

    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn with_permissions<I, P>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }
}
