use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The resource types served by this crate. Each one gets its own store.
///
/// Serialized as its [`segment`](ResourceKind::segment), the same spelling used in paths,
/// permissions and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "orders")]
    Order,
    #[serde(rename = "bom")]
    Bom,
    #[serde(rename = "products")]
    Product,
    #[serde(rename = "users")]
    User,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Order,
        ResourceKind::Bom,
        ResourceKind::Product,
        ResourceKind::User,
    ];

    /// Path segment and permission prefix, e.g. `orders` in `/orders/list` and `orders:list`.
    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Order => "orders",
            ResourceKind::Bom => "bom",
            ResourceKind::Product => "products",
            ResourceKind::User => "users",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}
