//! Error types for the resource stores.

use crate::model::ResourceKind;
use thiserror::Error;

/// Errors raised by [`Resource`](crate::model::Resource) lifecycle hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// A create request reached the store of a different resource kind.
    #[error("{found} resource sent to the {expected} store")]
    KindMismatch {
        expected: ResourceKind,
        found: ResourceKind,
    },
}
