//! The stored resource record.
//!
//! # Resource Actor
//! [`Resource`] implements [`ResourceEntity`](resource_actor::ResourceEntity) (see
//! [`crate::store::entity`]), so one [`ResourceActor`](resource_actor::ResourceActor)
//! per [`ResourceKind`] owns every instance of that kind.

use crate::model::ResourceKind;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Free-form key/value data carried by a resource. Never inspected by the service.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Identifier allocated by a resource store. Unique within one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A stored resource: an id, the type tag, and an opaque JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub payload: Payload,
}

/// Payload for creating a new resource in the store for `kind`.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub kind: ResourceKind,
    pub payload: Payload,
}
