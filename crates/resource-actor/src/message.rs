//! # Generic Messages
//!
//! The request envelope passed from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the resource lifecycle: `List` and `Get` read, `Create`, `Update`
/// and `Delete` mutate. Every variant carries its own `respond_to` channel, so the
/// actor can answer out of band while continuing to drain its queue in order.
///
/// `Delete` takes a list of ids and is all-or-nothing: either every id is present and
/// removed, or the store is left exactly as it was.
#[derive(Debug)]
pub enum ResourceRequest<T: ResourceEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T::Id>>,
    },
}
