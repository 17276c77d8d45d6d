//! # Generic Client
//!
//! The sending half of a `ResourceActor`.

use crate::entity::ResourceEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// A type-safe async handle to a `ResourceActor<T>`. Each call sends one
/// `ResourceRequest<T>` over the actor's mpsc channel and awaits the answer on a oneshot
/// channel. The client holds only a sender, so clones are cheap and can be handed to any
/// number of tasks.
#[derive(Clone)]
pub struct ResourceClient<T: ResourceEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// All entities, ordered by id.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.delete_many(vec![id]).await.map(|_| ())
    }

    /// Removes every id or none of them. Returns the removed ids with duplicates folded.
    pub async fn delete_many(&self, ids: Vec<T::Id>) -> Result<Vec<T::Id>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { ids, respond_to })
            .await
    }
}
