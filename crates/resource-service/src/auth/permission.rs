use crate::model::ResourceKind;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// An opaque capability string such as `orders:list`.
///
/// Permissions are compared segment by segment on `:`. A granted permission may use `*`
/// for any segment, and a bare `*` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The canonical `{segment}:{action}` permission for a resource kind.
    pub fn for_resource(kind: ResourceKind, action: &str) -> Self {
        Self(format!("{}:{}", kind.segment(), action))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    /// Whether holding `self` satisfies a requirement for `required`.
    pub fn grants(&self, required: &Permission) -> bool {
        if self.is_wildcard() || self == required {
            return true;
        }
        let granted: Vec<&str> = self.0.split(':').collect();
        let wanted: Vec<&str> = required.0.split(':').collect();
        granted.len() == wanted.len()
            && granted
                .iter()
                .zip(&wanted)
                .all(|(g, w)| *g == "*" || g == w)
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
