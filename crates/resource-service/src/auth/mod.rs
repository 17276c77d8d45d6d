//! Authorization: permissions, principals, and the check that gates every route.
//!
//! Authorization runs at the request boundary, after routing and before a handler sends
//! anything to a store. A denied request therefore has no side effects.

pub mod authorizer;
pub mod permission;
pub mod principal;

pub use authorizer::*;
pub use permission::*;
pub use principal::*;
