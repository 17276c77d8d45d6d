//! Pure data structures: the resource record, its id, and the resource kinds.

pub mod kind;
pub mod resource;

pub use kind::*;
pub use resource::*;
