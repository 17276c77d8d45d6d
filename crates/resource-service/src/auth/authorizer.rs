use super::{Permission, Principal};
use thiserror::Error;
use tracing::{debug, warn};

/// Outcome of a single permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(Permission),
}

/// Policy check run before any handler touches a store.
///
/// Implementations must be pure: no IO, no store access, no side effects.
pub trait Authorizer: Send + Sync {
    fn check(&self, principal: &Principal, required: &Permission) -> Decision;

    /// Gate for a route. `None` means the route declares no requirement and is open.
    fn require(&self, principal: &Principal, required: Option<&Permission>) -> Result<(), AuthzError> {
        let Some(required) = required else {
            return Ok(());
        };
        match self.check(principal, required) {
            Decision::Allowed => {
                debug!(principal = principal.id(), permission = %required, "Permission granted");
                Ok(())
            }
            Decision::Denied => {
                warn!(principal = principal.id(), permission = %required, "Permission denied");
                Err(AuthzError::Forbidden(required.clone()))
            }
        }
    }
}

/// Grants when any of the principal's permissions covers the requirement
/// (see [`Permission::grants`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionAuthorizer;

impl Authorizer for PermissionAuthorizer {
    fn check(&self, principal: &Principal, required: &Permission) -> Decision {
        if principal.permissions().any(|granted| granted.grants(required)) {
            Decision::Allowed
        } else {
            Decision::Denied
        }
    }
}
